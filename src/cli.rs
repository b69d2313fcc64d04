use crate::config::{
    Config, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, OPENAI_API_KEY_ENV, YOUTUBE_API_KEY_ENV,
};
use crate::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tubescope")]
#[command(about = "YouTube video quality, engagement and reach analyzer")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub settings: Settings,
}

#[derive(Args)]
pub struct Settings {
    /// YouTube Data API v3 key
    #[arg(long, env = YOUTUBE_API_KEY_ENV, hide_env_values = true, global = true)]
    pub youtube_api_key: Option<String>,

    /// OpenAI API key used for the written analysis
    #[arg(long, env = OPENAI_API_KEY_ENV, hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,

    /// Model that writes the analysis
    #[arg(long, env = "TUBESCOPE_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Preferred transcript languages (comma-separated)
    #[arg(short, long, env = "TUBESCOPE_LANGUAGES", default_value = "en", global = true)]
    pub languages: String,

    /// Upper bound on the analysis length, in tokens
    #[arg(long, env = "TUBESCOPE_MAX_OUTPUT_TOKENS", default_value_t = DEFAULT_MAX_OUTPUT_TOKENS, global = true)]
    pub max_output_tokens: u32,
}

impl Settings {
    pub fn into_config(self) -> Result<Config> {
        Ok(Config::new(self.youtube_api_key, self.openai_api_key)?
            .with_model(self.model)
            .with_languages(&self.languages)
            .with_max_output_tokens(self.max_output_tokens))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a video and estimate its reach potential
    Analyze {
        /// YouTube video URL
        url: String,

        /// Competitor's video URL to benchmark against
        #[arg(short, long)]
        competitor: Option<String>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Wrap the analysis text at this many columns
        #[arg(short, long, default_value_t = 100)]
        width: usize,
    },

    /// Show title and statistics for a video
    Info {
        /// YouTube video URL
        url: String,
    },

    /// Print the timestamped transcript of a video
    Transcript {
        /// YouTube video URL
        url: String,
    },

    /// Open TUI interface
    Tui,
}
