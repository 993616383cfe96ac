//! New/edit recipe form
//!
//! Submitted as multipart by the client script; the JSON envelope it gets
//! back drives the feedback dialog.

use cocina_common::validation::{DESCRIPTION_MAX_CHARS, DESCRIPTION_MIN_CHARS};
use cocina_common::{Category, Recipe};

use super::{category_flags, difficulty_flags, escape, layout};

pub(super) fn render(recipe: Option<&Recipe>) -> String {
    let (title, action) = match recipe {
        Some(r) => ("Editar receta", format!("/receta/editar/{}", r.id)),
        None => ("Nueva receta", "/receta/nueva".to_string()),
    };
    let field = |value: Option<&str>| value.map(escape).unwrap_or_default();

    let selected_category = recipe.map(|r| r.category);
    let category_options: String = category_flags(selected_category.map(Category::as_str))
        .into_iter()
        .map(|(c, on)| option(c.as_str(), c.label(), on))
        .collect();
    let difficulty_options: String = difficulty_flags(recipe.map(|r| r.difficulty))
        .into_iter()
        .map(|(d, on)| option(d.as_str(), d.label(), on))
        .collect();

    let current_image = match recipe {
        Some(r) if !r.has_default_image() => format!(
            r#"            <div class="current-image">
                <img src="{}" alt="Imagen actual">
                <label><input type="checkbox" name="removeImageFlag" value="true"> Quitar imagen</label>
            </div>
"#,
            escape(&r.image_url())
        ),
        _ => String::new(),
    };

    let content = format!(
        r#"        <h1>{title}</h1>
        <form id="recipeForm" class="recipe-form" action="{action}" method="post"
              enctype="multipart/form-data" novalidate>
            <label for="recipeName">Nombre</label>
            <input type="text" id="recipeName" name="name" value="{name}" required>
            <div class="invalid-feedback">El nombre debe comenzar con mayúscula.</div>

            <label for="recipeDescription">Descripción</label>
            <textarea id="recipeDescription" name="description" minlength="{min}" maxlength="{max}" required>{description}</textarea>

            <label for="recipeIngredients">Ingredientes</label>
            <textarea id="recipeIngredients" name="ingredients" required>{ingredients}</textarea>

            <label for="recipeCategory">Categoría</label>
            <select id="recipeCategory" name="category" required>
                <option value="">Elige una categoría</option>
{category_options}            </select>

            <label for="recipeDifficulty">Dificultad</label>
            <select id="recipeDifficulty" name="difficulty" required>
                <option value="">Elige una dificultad</option>
{difficulty_options}            </select>

            <label for="recipeTime">Tiempo de preparación (minutos)</label>
            <input type="number" id="recipeTime" name="preparationTime" min="1" step="1" value="{minutes}" required>

{current_image}            <label for="recipeImage">Imagen</label>
            <input type="file" id="recipeImage" name="recipeImage" accept="image/*">

            <button type="submit" class="button">Guardar</button>
            <span id="loadingSpinner" class="spinner hidden"></span>
        </form>"#,
        title = title,
        action = action,
        name = field(recipe.map(|r| r.name.as_str())),
        description = field(recipe.map(|r| r.description.as_str())),
        ingredients = field(recipe.map(|r| r.ingredients.as_str())),
        min = DESCRIPTION_MIN_CHARS,
        max = DESCRIPTION_MAX_CHARS,
        category_options = category_options,
        difficulty_options = difficulty_options,
        minutes = recipe.map(|r| r.preparation_time.to_string()).unwrap_or_default(),
        current_image = current_image,
    );

    layout(title, &content)
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "                <option value=\"{}\"{}>{}</option>\n",
        value,
        if selected { " selected" } else { "" },
        label
    )
}
