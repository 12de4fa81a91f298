// Screens a handful of sample documents and prints the verdicts as JSON.
//
// Pass a config file path to override the defaults:
//   cargo run --example screen_samples -- screen.json
use anyhow::Context;
use textscreen::logging::init_tracing;
use textscreen::screen::config::ScreenConfig;
use textscreen::Screener;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => ScreenConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => ScreenConfig::default(),
    };
    let (screener, source) = Screener::from_config(&config)?;
    println!("Stopwords: {source}");

    let samples = [
        "This is a perfectly normal English sentence that should pass sanity check.",
        "asdkj qweuioq zxcmvnq qweiuo",
        "Esto es un documento válido en español.",
        "这是一个有效的中文句子。",
        "これは有効な日本語の文です。",
        "이것은 유효한 한국어 문장입니다.",
        "123 456 $$$ ####",
    ];

    for text in samples {
        let verdict = screener.sanity_check(text);
        println!("\n{text}");
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    }
    Ok(())
}
