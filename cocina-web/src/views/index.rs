//! Catalog listing: search box, category pills, recipe cards, page window

use cocina_common::Recipe;

use super::{category_flags, escape, layout, IndexPage};
use crate::pagination::{page_window, PageLink};

pub(super) fn render(page: &IndexPage<'_>) -> String {
    let search = page.search.unwrap_or_default();
    let initial_next_page = page
        .pagination
        .next_page()
        .map(|p| p.to_string())
        .unwrap_or_default();

    let cards: String = page.recipes.iter().map(card).collect();
    let empty = if page.recipes.is_empty() {
        r#"<p class="empty">No se encontraron recetas.</p>"#
    } else {
        ""
    };

    let content = format!(
        r#"        <section class="toolbar">
            <form class="search" method="get" action="/">
                <input type="search" name="search" value="{search}" placeholder="Buscar recetas...">
                {category_hidden}
                <button type="submit" class="button">Buscar</button>
            </form>
            <nav class="categories">
{pills}
            </nav>
        </section>
        <p class="result-count">{total} recetas</p>
        <section id="recipeGrid" class="recipe-grid"
                 data-initial-next-page="{initial_next_page}"
                 data-search="{search}"
                 data-category="{category}">
{cards}
        </section>
        {empty}
        <div id="scrollSentinel"></div>
{pagination}"#,
        search = escape(search),
        category_hidden = page
            .category
            .map(|c| format!(r#"<input type="hidden" name="category" value="{}">"#, escape(c)))
            .unwrap_or_default(),
        pills = category_pills(page),
        total = page.total_count,
        initial_next_page = initial_next_page,
        category = escape(page.category.unwrap_or_default()),
        cards = cards,
        empty = empty,
        pagination = pagination_nav(page),
    );

    layout("Recetas", &content)
}

fn card(recipe: &Recipe) -> String {
    format!(
        r#"            <article class="recipe-card">
                <a href="/receta/{id}">
                    <img src="{image}" alt="{name}" loading="lazy">
                    <h3>{name}</h3>
                </a>
                <p class="meta">{category} · {difficulty} · {minutes} min</p>
            </article>
"#,
        id = recipe.id,
        image = escape(&recipe.image_url()),
        name = escape(&recipe.name),
        category = recipe.category.label(),
        difficulty = recipe.difficulty.label(),
        minutes = recipe.preparation_time,
    )
}

fn category_pills(page: &IndexPage<'_>) -> String {
    let all_active = page.category.is_none();
    let mut pills = format!(
        "                <a class=\"pill{}\" href=\"{}\">Todas</a>\n",
        if all_active { " active" } else { "" },
        listing_href(1, page.search, None),
    );
    for (category, active) in category_flags(page.category) {
        pills.push_str(&format!(
            "                <a class=\"pill{}\" href=\"{}\">{}</a>\n",
            if active { " active" } else { "" },
            listing_href(1, page.search, Some(category.as_str())),
            category.label(),
        ));
    }
    pills
}

fn pagination_nav(page: &IndexPage<'_>) -> String {
    let p = page.pagination;
    if p.total_pages <= 1 {
        return String::new();
    }

    let mut items = String::new();
    if let Some(prev) = p.prev_page() {
        items.push_str(&format!(
            "            <a class=\"page\" href=\"{}\">&laquo;</a>\n",
            listing_href(prev, page.search, page.category)
        ));
    }
    for link in page_window(p.page, p.total_pages) {
        match link {
            PageLink::Page { number, current: true } => {
                items.push_str(&format!(
                    "            <span class=\"page current\">{}</span>\n",
                    number
                ));
            }
            PageLink::Page { number, .. } => {
                items.push_str(&format!(
                    "            <a class=\"page\" href=\"{}\">{}</a>\n",
                    listing_href(number, page.search, page.category),
                    number
                ));
            }
            PageLink::Ellipsis => {
                items.push_str("            <span class=\"page ellipsis\">&hellip;</span>\n");
            }
        }
    }
    if let Some(next) = p.next_page() {
        items.push_str(&format!(
            "            <a class=\"page\" href=\"{}\">&raquo;</a>\n",
            listing_href(next, page.search, page.category)
        ));
    }

    format!("        <nav class=\"pagination\">\n{}        </nav>", items)
}

/// Listing URL that keeps the active filters
fn listing_href(page: i64, search: Option<&str>, category: Option<&str>) -> String {
    let mut href = format!("/?page={}", page);
    if let Some(search) = search {
        href.push_str("&amp;search=");
        href.push_str(&urlencoding::encode(search));
    }
    if let Some(category) = category {
        href.push_str("&amp;category=");
        href.push_str(&urlencoding::encode(category));
    }
    href
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::calculate_pagination;

    #[test]
    fn test_listing_href_encodes_filters() {
        assert_eq!(listing_href(2, None, None), "/?page=2");
        assert_eq!(
            listing_href(1, Some("tarta & café"), Some("postre")),
            "/?page=1&amp;search=tarta%20%26%20caf%C3%A9&amp;category=postre"
        );
    }

    #[test]
    fn test_index_marks_active_category_and_next_page() {
        let page = IndexPage {
            recipes: &[],
            total_count: 14,
            pagination: calculate_pagination(14, 1),
            search: Some("<b>"),
            category: Some("vegano"),
        };
        let html = render(&page);

        assert!(html.contains(r#"data-initial-next-page="2""#));
        assert!(html.contains(r#"class="pill active" href="/?page=1&amp;search=%3Cb%3E&amp;category=vegano">Veganos"#));
        assert!(html.contains("value=\"&lt;b&gt;\""));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_index_last_page_has_empty_cursor() {
        let page = IndexPage {
            recipes: &[],
            total_count: 3,
            pagination: calculate_pagination(3, 1),
            search: None,
            category: None,
        };
        let html = render(&page);
        assert!(html.contains(r#"data-initial-next-page="""#));
        assert!(!html.contains("class=\"pagination\""));
    }
}
