pub const BANNER: &str = "Scientific-Paper Scout Agent (type 'exit' to quit)";
pub const USAGE: &str =
    "Commands: search <query> (e.g. search large language models) | summarize <PDF_URL>";
pub const PROMPT: &str = "> ";
pub const TYPING: &str = "Typing...";
pub const USER_PREFIX: &str = "you: ";
pub const BOT_PREFIX: &str = "bot: ";
pub const NOT_AVAILABLE: &str = "N/A";
