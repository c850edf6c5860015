use anyhow::{Context, Result};
use clap::Parser;
use openai_ask::app::App;
use openai_ask::models::{AskOutputs, Config, ContentSource, ImageFormat, VisionMode};
use openai_ask::prompts;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "openai-ask")]
#[command(about = "Ask an OpenAI-compatible endpoint and split the reply into positive/negative prompts")]
struct CliArgs {
    /// Question to send. Defaults to asking for a `Prompt:`/`Negative:` pair.
    #[arg(value_name = "QUESTION")]
    question: Option<String>,

    /// Image to attach to the question.
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// System prompt; pass an empty string to omit the system message.
    #[arg(long)]
    system_prompt: Option<String>,

    /// Server base address, e.g. http://127.0.0.1:10000 (overrides OPENAI_ASK_API_BASE).
    #[arg(long)]
    api_base: Option<String>,

    #[arg(long)]
    endpoint_path: Option<String>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    api_key: Option<String>,

    /// Extra HTTP headers as a JSON object, e.g. '{"X-My-Header":"abc"}'.
    #[arg(long, value_name = "JSON")]
    extra_headers: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=600))]
    timeout: Option<u64>,

    #[arg(long, default_value_t = 0.3, value_parser = parse_temperature)]
    temperature: f32,

    #[arg(long, default_value_t = 1.0, value_parser = parse_top_p)]
    top_p: f32,

    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..=8192))]
    max_tokens: u32,

    #[arg(long, value_enum, default_value_t = VisionMode::Auto)]
    use_vision: VisionMode,

    /// Which message field to read the answer from.
    #[arg(long, value_enum, default_value_t = ContentSource::ContentOnly)]
    content_source: ContentSource,

    /// Longest image side after downscaling; 0 keeps the original size.
    #[arg(long, default_value_t = 1280, value_parser = parse_max_side)]
    max_side: u32,

    #[arg(long, value_enum, default_value_t = ImageFormat::Jpeg)]
    image_format: ImageFormat,

    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(50..=100))]
    jpeg_quality: u8,

    /// Print the four outputs as one JSON object.
    #[arg(long)]
    json: bool,
}

impl CliArgs {
    /// Layer command-line flags over the environment configuration.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(endpoint_path) = &self.endpoint_path {
            config.endpoint_path = endpoint_path.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(extra_headers) = &self.extra_headers {
            config.extra_headers_json = extra_headers.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout = Duration::from_secs(timeout);
        }
        if let Some(system_prompt) = &self.system_prompt {
            config.system_prompt = system_prompt.clone();
        }

        config.temperature = self.temperature;
        config.top_p = self.top_p;
        config.max_tokens = self.max_tokens;
        config.use_vision = self.use_vision;
        config.content_source = self.content_source;
        config.image.max_side = self.max_side;
        config.image.format = self.image_format;
        config.image.jpeg_quality = self.jpeg_quality;
        config
    }

    fn question(&self) -> &str {
        self.question.as_deref().unwrap_or(prompts::DEFAULT_QUESTION)
    }
}

fn parse_bounded_f32(input: &str, min: f32, max: f32) -> std::result::Result<f32, String> {
    let value: f32 = input
        .parse()
        .map_err(|_| format!("Invalid number '{}'", input))?;
    if !(min..=max).contains(&value) {
        return Err(format!("{} is not in {}..={}", value, min, max));
    }
    Ok(value)
}

fn parse_temperature(input: &str) -> std::result::Result<f32, String> {
    parse_bounded_f32(input, 0.0, 2.0)
}

fn parse_top_p(input: &str) -> std::result::Result<f32, String> {
    parse_bounded_f32(input, 0.0, 1.0)
}

fn parse_max_side(input: &str) -> std::result::Result<u32, String> {
    let value: u32 = input
        .parse()
        .map_err(|_| format!("Invalid size '{}'", input))?;
    if value != 0 && !(256..=4096).contains(&value) {
        return Err(format!("{} must be 0 or in 256..=4096", value));
    }
    Ok(value)
}

fn render_outputs(outputs: &AskOutputs, as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string_pretty(outputs)?);
    }

    let sections = [
        ("positive", &outputs.positive),
        ("negative", &outputs.negative),
        ("answer_text", &outputs.answer_text),
        ("raw_json", &outputs.raw_json),
    ];
    Ok(sections
        .iter()
        .map(|(name, value)| format!("=== {} ===\n{}", name, value))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openai_ask=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => args.apply_to(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let image = match &args.image {
        Some(path) => match tokio::fs::read(path)
            .await
            .with_context(|| format!("reading image {}", path.display()))
        {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!("{:#}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let app = App::new(config);
    let outputs = app.ask(args.question(), image.as_deref()).await;
    info!("Ask finished");

    println!("{}", render_outputs(&outputs, args.json)?);
    Ok(())
}
