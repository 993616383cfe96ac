use super::{escape, layout};

pub(super) fn render(status: u16, message: &str) -> String {
    let content = format!(
        r#"        <section class="error-page">
            <h1>Error {status}</h1>
            <p>{message}</p>
            <a class="button" href="/">Volver al inicio</a>
        </section>"#,
        status = status,
        message = escape(message),
    );
    layout("Error", &content)
}
