use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

use crate::message::Reply;
use crate::picker::pick;
use crate::recipe::{Category, Pool};
use crate::store::Catalog;

/// Marker that steers an "eat" request to breakfast.
const BREAKFAST_MARKER: char = '早';

fn re_eat() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"吃(点|个|些)?(啥|什么)").expect("eat pattern is valid"))
}

fn re_drink() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"喝(点|个|些)?(啥|什么)").expect("drink pattern is valid"))
}

fn re_dessert() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(来|整|吃)(点|个)?(什么|啥)(甜品|点心|甜点|下午茶)")
            .expect("dessert pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Eat,
    Drink,
    Dessert,
}

/// Match the message against the intent patterns, first hit wins.
/// Patterns are unanchored: they match anywhere in the text.
pub fn detect_intent(text: &str) -> Option<Intent> {
    if re_eat().is_match(text) {
        Some(Intent::Eat)
    } else if re_drink().is_match(text) {
        Some(Intent::Drink)
    } else if re_dessert().is_match(text) {
        Some(Intent::Dessert)
    } else {
        None
    }
}

/// Which pool to suggest from, given the message and the local hour.
pub fn choose_pool(text: &str, hour: u32) -> Option<Pool> {
    let pool = match detect_intent(text)? {
        Intent::Eat if text.contains(BREAKFAST_MARKER) || (hour > 4 && hour < 9) => {
            Pool::Category(Category::Breakfast)
        }
        Intent::Eat => Pool::MainFood,
        Intent::Drink => Pool::Category(Category::Drink),
        Intent::Dessert => Pool::Category(Category::Dessert),
    };
    Some(pool)
}

/// Reply with a random dish for a recognized request, or `None` to pass
/// the message on. An empty pool also passes.
pub fn suggest<R>(catalog: &Catalog, text: &str, hour: u32, rng: &mut R) -> Option<Reply>
where
    R: Rng + ?Sized,
{
    let pool = choose_pool(text, hour)?;
    let candidates = catalog.subset(pool);
    let Some(dish) = pick(&candidates, rng) else {
        tracing::debug!(%pool, "no recipes to suggest");
        return None;
    };
    Some(Reply::text(format!("建议 {}", dish.title)))
}
