use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(theme: &ColorfulTheme, prompt: &str, default: bool) -> dialoguer::Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
}

/// Prompt the user for free-form text input, optionally pre-filled.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
    allow_empty: bool,
) -> dialoguer::Result<String> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(allow_empty);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    input.interact_text()
}

/// Prompt the user to pick one of `items`, returning its index.
pub fn select(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
    default: usize,
) -> dialoguer::Result<usize> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
}
