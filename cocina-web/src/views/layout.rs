//! Shared page chrome

use super::escape;

/// Wrap page content in the site layout
///
/// Every page carries the feedback dialog used by the AJAX forms.
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} · Cocina</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header class="site-header">
        <a class="brand" href="/">Cocina</a>
        <nav>
            <a href="/">Recetas</a>
            <a class="button" href="/receta/nueva">Nueva receta</a>
        </nav>
    </header>
    <main class="container">
{content}
    </main>
    <dialog id="feedbackModal" class="modal">
        <h2 id="modalTitle" class="modal-title"></h2>
        <p id="modalBody"></p>
        <div class="modal-actions">
            <a id="modalActionBtn" class="button hidden" href="/">Ver receta</a>
            <button type="button" class="button secondary" data-close-modal>Cerrar</button>
        </div>
    </dialog>
    <footer class="site-footer">cocina-web v{version}</footer>
    <script src="/static/app.js"></script>
</body>
</html>
"#,
        title = escape(title),
        content = content,
        version = env!("CARGO_PKG_VERSION"),
    )
}
