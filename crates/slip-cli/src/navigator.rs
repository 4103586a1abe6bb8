use colored::Colorize;
use slip_core::navigation::{Navigator, Notice, Route};

/// Renders navigation commands as terminal messages.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        let hint = match route {
            Route::Login => "run `slip login` to sign in",
            Route::Dashboard => "run `slip me`",
            Route::Manager => "run `slip archives` or `slip run`",
        };
        eprintln!("{} {} ({})", "→".bright_black(), route.path().bold(), hint);
    }

    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice.message.bright_yellow().bold());
    }
}
