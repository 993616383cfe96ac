//! Stand-alone step edit form, used when inline editing is unavailable

use cocina_common::{Recipe, Step};

use super::{escape, layout};

pub(super) fn render(recipe: &Recipe, step: &Step) -> String {
    let content = format!(
        r#"        <h1>Editar paso {order}</h1>
        <p class="meta">Receta: <a href="/receta/{recipe_id}">{recipe_name}</a></p>
        <form id="editStepForm" class="step-form" method="post"
              action="/receta/{recipe_id}/paso/editar/{step_id}"
              data-return-url="/receta/{recipe_id}">
            <label for="stepName">Nombre</label>
            <input type="text" id="stepName" name="stepName" value="{name}" required>
            <label for="stepDescription">Descripción</label>
            <textarea id="stepDescription" name="stepDescription" required>{description}</textarea>
            <button type="submit" class="button">Guardar</button>
            <a class="button secondary" href="/receta/{recipe_id}">Cancelar</a>
        </form>"#,
        order = step.order,
        recipe_id = recipe.id,
        recipe_name = escape(&recipe.name),
        step_id = step.id,
        name = escape(&step.name),
        description = escape(&step.description),
    );
    layout("Editar paso", &content)
}
