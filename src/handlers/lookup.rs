use crate::config::UseProxy;
use crate::message::{Reply, Segment};
use crate::recipe::Recipe;
use crate::store::Catalog;

/// Command word for a recipe lookup.
pub const COMMAND: &str = "查看菜谱";
pub const NOT_FOUND: &str = "404 Not Found @w@";
pub const USAGE: &str = "用法: 查看菜谱 <菜名>, 例如: 查看菜谱 西红柿炒鸡蛋";

/// Look up a recipe by exact title and render it.
pub fn lookup(catalog: &Catalog, dish: &str, proxy: &UseProxy) -> Reply {
    let dish = dish.trim();
    if dish.is_empty() {
        return Reply::text(USAGE);
    }
    let Some(recipe) = catalog.find(dish) else {
        return Reply::text(NOT_FOUND);
    };
    tracing::debug!(?recipe, "matched recipe");
    render_recipe(recipe, proxy)
}

/// Full detail view: title, introduction, image, ingredients, quantities,
/// steps, notes. Empty or absent parts are left out.
pub fn render_recipe(recipe: &Recipe, proxy: &UseProxy) -> Reply {
    let mut segments = vec![Segment::text(&recipe.title)];

    if !recipe.introduction.is_empty() {
        segments.push(Segment::text(format!("简介: {}", recipe.introduction)));
    }

    if let Some(url) = recipe.cover_image() {
        segments.push(Segment::image(proxy.apply(url)));
    }

    if let Some(ingredients) = &recipe.ingredients {
        // every item keeps its trailing ", ", including the last
        let line: String = ingredients.iter().map(|i| format!("{i}, ")).collect();
        segments.push(Segment::text(format!("原料: {line}")));
    }

    if let Some(calculations) = &recipe.calculations {
        segments.push(Segment::text(format!("用量: \r\n{}", lines(calculations))));
    }

    if let Some(steps) = &recipe.steps {
        segments.push(Segment::text(format!("步骤: \r\n{}", lines(steps))));
    }

    if !recipe.notes.is_empty() {
        segments.push(Segment::text(&recipe.notes));
    }

    Reply::Figure { segments }
}

fn lines(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("{i}\r\n"))
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::recipe;

    fn full() -> Recipe {
        Recipe {
            title: "西红柿炒鸡蛋".into(),
            category: "vegetable_dish".into(),
            image: Some(vec!["http://x/a.png".into(), "http://x/b.png".into()]),
            introduction: "快手家常菜".into(),
            difficulty: "★★".into(),
            ingredients: Some(vec!["西红柿".into(), "鸡蛋".into()]),
            calculations: Some(vec!["西红柿 2 个".into(), "鸡蛋 3 个  ".into()]),
            steps: Some(vec!["打散鸡蛋".into(), "炒西红柿".into(), "混合出锅".into()]),
            notes: "可以加糖".into(),
        }
    }

    fn segments(reply: Reply) -> Vec<Segment> {
        match reply {
            Reply::Figure { segments } => segments,
            Reply::Text { content } => panic!("expected figure, got text {content:?}"),
        }
    }

    #[test]
    fn renders_all_parts_in_order() {
        let segs = segments(render_recipe(&full(), &UseProxy::Direct));
        assert_eq!(
            segs,
            vec![
                Segment::text("西红柿炒鸡蛋"),
                Segment::text("简介: 快手家常菜"),
                Segment::image("http://x/a.png"),
                Segment::text("原料: 西红柿, 鸡蛋, "),
                Segment::text("用量: \r\n西红柿 2 个\r\n鸡蛋 3 个"),
                Segment::text("步骤: \r\n打散鸡蛋\r\n炒西红柿\r\n混合出锅"),
                Segment::text("可以加糖"),
            ]
        );
    }

    #[test]
    fn difficulty_is_not_rendered() {
        let plain = render_recipe(&full(), &UseProxy::Direct).to_plain();
        assert!(!plain.contains("★"));
    }

    #[test]
    fn minimal_recipe_renders_title_only() {
        let segs = segments(render_recipe(&recipe("白开水", "drink"), &UseProxy::Direct));
        assert_eq!(segs, vec![Segment::text("白开水")]);
    }

    #[test]
    fn introduction_included_only_when_present() {
        let mut r = full();
        r.introduction = String::new();
        let segs = segments(render_recipe(&r, &UseProxy::Direct));
        assert!(!segs.iter().any(|s| matches!(s, Segment::Text { content } if content.starts_with("简介"))));

        r.introduction = "  有空格的简介 ".into();
        let segs = segments(render_recipe(&r, &UseProxy::Direct));
        assert_eq!(segs[1], Segment::text("简介:   有空格的简介 "));
    }

    #[test]
    fn image_direct_and_proxied() {
        let mut r = recipe("x", "soup");
        r.image = Some(vec!["http://x/a.png".into()]);

        let segs = segments(render_recipe(&r, &UseProxy::Direct));
        assert_eq!(segs[1], Segment::image("http://x/a.png"));

        let segs = segments(render_recipe(&r, &UseProxy::Prefix("https://p/".into())));
        assert_eq!(segs[1], Segment::image("https://p/http://x/a.png"));
    }

    #[test]
    fn empty_ingredient_list_still_rendered() {
        let mut r = recipe("x", "soup");
        r.ingredients = Some(vec![]);
        let segs = segments(render_recipe(&r, &UseProxy::Direct));
        assert_eq!(segs[1], Segment::text("原料: "));
    }

    #[test]
    fn lookup_not_found() {
        let catalog = Catalog::new(vec![full()]);
        let reply = lookup(&catalog, "西红柿", &UseProxy::Direct);
        assert_eq!(reply, Reply::text(NOT_FOUND));
    }

    #[test]
    fn lookup_found_trims_argument() {
        let catalog = Catalog::new(vec![full()]);
        let segs = segments(lookup(&catalog, " 西红柿炒鸡蛋 ", &UseProxy::Direct));
        assert_eq!(segs[0], Segment::text("西红柿炒鸡蛋"));
    }

    #[test]
    fn lookup_empty_argument_shows_usage() {
        let catalog = Catalog::new(vec![full()]);
        assert_eq!(lookup(&catalog, "   ", &UseProxy::Direct), Reply::text(USAGE));
    }
}
