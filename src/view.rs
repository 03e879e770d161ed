//! Server-rendered HTML for the list page

use crate::domain::todo_list::ListPage;

/// Escapes text for safe inclusion in HTML element content and quoted attributes
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for character in raw.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders the page for a single list: navigation across all lists, then the active list's todos
pub fn render_list_page(page: &ListPage) -> String {
    let active_list_id = page.active_list.as_ref().map(|list| list.id);
    let title = page
        .active_list
        .as_ref()
        .map(|list| escape_html(&list.name))
        .unwrap_or_else(|| "No list selected".to_owned());

    let list_items: String = page
        .lists
        .iter()
        .map(|list| {
            let active_class = if Some(list.id) == active_list_id {
                " class=\"active\""
            } else {
                ""
            };
            format!(
                "<li data-id=\"{id}\"{active_class}><a href=\"/lists/{id}\">{name}</a></li>\n",
                id = list.id,
                name = escape_html(&list.name)
            )
        })
        .collect();

    let todo_items: String = page
        .todos
        .iter()
        .map(|todo| {
            let checked = if todo.complete { " checked" } else { "" };
            format!(
                "<li data-id=\"{}\"><input class=\"check-completed\" type=\"checkbox\"{checked}> {}</li>\n",
                todo.id,
                escape_html(&todo.description)
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Todo App: {title}</title>\n</head>\n<body>\n\
         <nav>\n<h4>Todo Lists</h4>\n<ul id=\"lists\">\n{list_items}</ul>\n</nav>\n\
         <main>\n<h4>{title}</h4>\n<ul id=\"todos\">\n{todo_items}</ul>\n</main>\n</body>\n</html>\n"
    )
}
