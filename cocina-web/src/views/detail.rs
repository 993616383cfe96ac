//! Recipe detail page with inline step management

use cocina_common::{Recipe, Step};

use super::{escape, layout};

pub(super) fn render(recipe: &Recipe) -> String {
    let steps: String = recipe.steps.iter().map(|s| step_item(recipe, s)).collect();
    let no_steps_hidden = if recipe.steps.is_empty() { "" } else { " hidden" };

    let content = format!(
        r#"        <article class="recipe-detail" data-recipe-id="{id}">
            <img class="hero" src="{image}" alt="{name}">
            <h1>{name}</h1>
            <p class="meta">{category} · {difficulty} · {minutes} min</p>
            <p class="description">{description}</p>
            <h2>Ingredientes</h2>
            <p class="ingredients">{ingredients}</p>

            <h2>Pasos</h2>
            <p id="noSteps" class="empty{no_steps_hidden}">Esta receta aún no tiene pasos.</p>
            <ol id="stepList" class="steps">
{steps}
            </ol>

            <form id="addStepForm" class="step-form" action="/receta/{id}/paso/nuevo" method="post">
                <h3>Añadir paso</h3>
                <input type="text" name="stepName" placeholder="Nombre del paso" required>
                <textarea name="stepDescription" placeholder="Descripción" required></textarea>
                <button type="submit" class="button">Añadir</button>
            </form>

            <div class="actions">
                <a class="button" href="/receta/editar/{id}">Editar receta</a>
                <form class="ajax-delete" action="/receta/borrar/{id}" method="post"
                      data-confirm="¿Seguro que quieres borrar esta receta?">
                    <button type="submit" class="button danger">Borrar receta</button>
                </form>
            </div>
        </article>"#,
        id = recipe.id,
        image = escape(&recipe.image_url()),
        name = escape(&recipe.name),
        category = recipe.category.label(),
        difficulty = recipe.difficulty.label(),
        minutes = recipe.preparation_time,
        description = escape(&recipe.description),
        ingredients = escape(&recipe.ingredients),
        no_steps_hidden = no_steps_hidden,
        steps = steps,
    );

    layout(&recipe.name, &content)
}

fn step_item(recipe: &Recipe, step: &Step) -> String {
    format!(
        r#"                <li class="step" data-step-id="{step_id}" data-order="{order}">
                    <div class="step-view">
                        <strong class="step-name">{name}</strong>
                        <p class="step-description">{description}</p>
                        <a class="link" href="/receta/{recipe_id}/paso/editar/{step_id}" data-edit-step>Editar</a>
                        <button type="button" class="link danger" data-delete-step
                                data-url="/receta/{recipe_id}/paso/borrar/{step_id}">Borrar</button>
                    </div>
                </li>
"#,
        recipe_id = recipe.id,
        step_id = step.id,
        order = step.order,
        name = escape(&step.name),
        description = escape(&step.description),
    )
}
