//! Commands derived from the tab the palette is opened over.

use std::sync::Arc;

use cmdpal_common::{InputBoxOptions, Tab, TriggerError};
use cmdpal_palette::{Command, TriggerOutcome, BUILTIN_GROUP};
use cmdpal_platform::{BrowserProvider, PromptProvider};
use tracing::debug;

const WOLFRAM_ALPHA_QUERY: &str = "https://www.wolframalpha.com/input/?i=";

pub fn wolfram_alpha_url(input: &str) -> String {
    format!("{WOLFRAM_ALPHA_QUERY}{}", urlencoding::encode(input))
}

/// The built-in group for `host`.
///
/// Copy commands appear only when the tab has the fields they copy. The
/// whole list is meant to replace the `builtin` group in one call.
pub fn builtin_commands(
    host: &Tab,
    browser: Arc<dyn BrowserProvider>,
    prompt: Arc<dyn PromptProvider>,
) -> Vec<Command> {
    let mut commands = Vec::new();

    if let Some(url) = &host.url {
        commands.push(copy_command(
            "builtin.copyPageUrl",
            "Copy: Page URL",
            url.clone(),
            &browser,
        ));
    }
    if let Some(title) = &host.title {
        commands.push(copy_command(
            "builtin.copyPageTitle",
            "Copy: Page Title",
            title.clone(),
            &browser,
        ));
    }
    if let (Some(title), Some(url)) = (&host.title, &host.url) {
        commands.push(copy_command(
            "builtin.copyPageTitleAndUrl",
            "Copy: Page Title and URL as Markdown",
            format!("[{title}]({url})"),
            &browser,
        ));
    }

    commands.push(
        Command::new(
            "builtin.wolframalpha",
            "Calculate: calculate and explain computational",
            move || calculate(Arc::clone(&browser), Arc::clone(&prompt)),
        )
        .with_detail("Calculate and explain the input using WolframAlpha"),
    );

    commands
        .into_iter()
        .map(|command| command.in_group(BUILTIN_GROUP))
        .collect()
}

fn copy_command(
    id: &str,
    title: &str,
    text: String,
    browser: &Arc<dyn BrowserProvider>,
) -> Command {
    let browser = Arc::clone(browser);
    let detail = text.clone();
    Command::new(id, title, move || copy(Arc::clone(&browser), text.clone())).with_detail(detail)
}

async fn copy(browser: Arc<dyn BrowserProvider>, text: String) -> Result<TriggerOutcome, TriggerError> {
    browser.write_clipboard_text(&text).await?;
    Ok(TriggerOutcome::Close)
}

async fn calculate(
    browser: Arc<dyn BrowserProvider>,
    prompt: Arc<dyn PromptProvider>,
) -> Result<TriggerOutcome, TriggerError> {
    let options = InputBoxOptions::new(
        "Enter what you want to calculate (Press 'Enter' to confirm or 'Escape' to cancel)",
    );
    let Some(input) = prompt.show_input_box(options).await? else {
        debug!("calculation cancelled");
        return Ok(TriggerOutcome::keep_open());
    };
    browser.open_url(&wolfram_alpha_url(&input)).await?;
    Ok(TriggerOutcome::Close)
}
