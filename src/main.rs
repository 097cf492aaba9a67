use clap::{Parser, Subcommand};
use msgdef::config::MsgDefConfig;
use msgdef::constants::file::CONFIG_FILE_NAME;
use msgdef::directory::processors;
use msgdef::file::properties;
use msgdef::i18n::{fmt_ui_msg, ui_msg, UiMsg};
use msgdef::{Component, DirectorySource, GlobalTranslator, Locale, MessageMap, TranslationStore};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// サジェストする候補の最大編集距離
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// ロケールごとのメッセージファイルを検査・同期する
#[derive(Parser, Debug)]
#[command(name = "msgdef", version)]
#[command(about = "Check, sync and render locale message files")]
struct Cli {
    /// Path to msgdef.toml (default: ./msgdef.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report messages that are missing from each locale file
    Check,
    /// Append missing default messages to each locale file
    Sync,
    /// Render a message in the given locale
    Render {
        /// Message key
        key: String,
        /// Locale (default: MSGDEF_LANG or LANG)
        #[arg(short, long)]
        locale: Option<Locale>,
        /// Arguments for <arg:N> placeholders
        args: Vec<String>,
    },
    /// Write a default msgdef.toml
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", ui_msg(UiMsg::ErrorPrefix), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("msgdef=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> msgdef::Result<ExitCode> {
    if let Command::Init = cli.command {
        let path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        return init(&path);
    }

    let config = match &cli.config {
        Some(path) => MsgDefConfig::load(path)?,
        None => MsgDefConfig::find_and_load()?,
    };

    match cli.command {
        Command::Check => check(&config),
        Command::Sync => sync(&config),
        Command::Render { key, locale, args } => {
            let locale = locale.unwrap_or_else(Locale::from_env);
            render(&config, &key, &locale, &args)
        }
        Command::Init => Ok(ExitCode::SUCCESS),
    }
}

fn init(path: &Path) -> msgdef::Result<ExitCode> {
    if path.exists() {
        eprintln!("{}", fmt_ui_msg(UiMsg::ConfigExists, &[&path.display().to_string()]));
        return Ok(ExitCode::FAILURE);
    }
    MsgDefConfig::default().save(path)?;
    println!("{}", fmt_ui_msg(UiMsg::ConfigCreated, &[&path.display().to_string()]));
    Ok(ExitCode::SUCCESS)
}

/// 各ロケールの不足メッセージを表示（ファイルは変更しない）
fn check(config: &MsgDefConfig) -> msgdef::Result<ExitCode> {
    let defaults = config.load_defaults()?;
    if defaults.is_none() {
        println!("{}", ui_msg(UiMsg::NoDefaults));
    }

    // デフォルトロケールのファイルを作らないよう、設定とは別に組み立てる
    let source = DirectorySource::new(config.directory())
        .file_extension(config.file_extension())
        .message_loader(properties::DEFAULT_LOADER)?;

    let mut seen = Vec::new();
    let mut incomplete = 0usize;
    let mut report = |locale: &Locale, path: &Path, messages: &MessageMap| {
        println!(
            "{}",
            fmt_ui_msg(
                UiMsg::CheckLocale,
                &[
                    &locale.to_string(),
                    &messages.len().to_string(),
                    &path.display().to_string(),
                ],
            )
        );

        let Some(defaults) = &defaults else {
            return;
        };
        let missing: Vec<&str> = defaults
            .keys()
            .filter(|key| !messages.contains_key(*key))
            .map(String::as_str)
            .collect();
        for key in &missing {
            println!("{}", fmt_ui_msg(UiMsg::CheckMissing, &[*key]));
        }
        for key in messages.keys().filter(|key| !defaults.contains_key(*key)) {
            println!("{}", fmt_ui_msg(UiMsg::CheckExtra, &[key.as_str()]));
        }
        if !missing.is_empty() {
            incomplete += 1;
        }
    };

    source.load(|loaded| {
        report(loaded.locale(), loaded.filepath(), loaded.message_map());
        seen.push(loaded.locale().clone());
        Ok(())
    })?;

    // 作成前のデフォルトロケールは空として扱う
    let extension = config.file_extension();
    for locale in &config.source.default_locales {
        if !seen.contains(locale) {
            let path = config.directory().join(extension.to_file_name(locale));
            report(locale, &path, &MessageMap::new());
            seen.push(locale.clone());
        }
    }

    if seen.is_empty() {
        println!(
            "{}",
            fmt_ui_msg(UiMsg::NoMessageFiles, &[&config.directory().display().to_string()])
        );
        return Ok(ExitCode::SUCCESS);
    }

    if incomplete > 0 {
        println!("{}", fmt_ui_msg(UiMsg::CheckFailed, &[&incomplete.to_string()]));
        Ok(ExitCode::FAILURE)
    } else {
        if defaults.is_some() {
            println!("{}", ui_msg(UiMsg::CheckOk));
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// 不足メッセージを各ファイルへ追記
fn sync(config: &MsgDefConfig) -> msgdef::Result<ExitCode> {
    let Some(defaults) = config.load_defaults()? else {
        eprintln!("{}", ui_msg(UiMsg::NoDefaults));
        return Ok(ExitCode::FAILURE);
    };

    let appended: Arc<Mutex<Vec<(PathBuf, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = appended.clone();
    let appender = move |path: &Path, missing: &MessageMap| -> msgdef::Result<()> {
        properties::append_to_file(path, missing)?;
        recorder.lock().push((path.to_path_buf(), missing.len()));
        Ok(())
    };

    let source = config
        .directory_source(None)?
        .message_processor(processors::append_missing_messages_with(defaults, appender))?;

    let mut loaded_locales = Vec::new();
    source.load(|loaded| {
        loaded_locales.push((loaded.locale().clone(), loaded.filepath().to_path_buf()));
        Ok(())
    })?;

    if loaded_locales.is_empty() {
        println!(
            "{}",
            fmt_ui_msg(UiMsg::NoMessageFiles, &[&config.directory().display().to_string()])
        );
        return Ok(ExitCode::SUCCESS);
    }

    let appended = appended.lock();
    for (locale, path) in &loaded_locales {
        let locale = locale.to_string();
        match appended.iter().find(|(p, _)| p == path) {
            Some((_, count)) => println!(
                "{}",
                fmt_ui_msg(UiMsg::SyncAppended, &[&locale, &count.to_string()])
            ),
            None => println!("{}", fmt_ui_msg(UiMsg::SyncUpToDate, &[&locale])),
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// メッセージを描画して表示（ファイル・ディレクトリは変更しない）
fn render(
    config: &MsgDefConfig,
    key: &str,
    locale: &Locale,
    args: &[String],
) -> msgdef::Result<ExitCode> {
    let defaults = config.load_defaults()?;

    // デフォルトロケールを渡すとディレクトリが作られるため、check と同じく設定とは別に組み立てる
    let mut source = DirectorySource::new(config.directory())
        .file_extension(config.file_extension())
        .message_loader(properties::DEFAULT_LOADER)?;
    if let Some(defaults) = &defaults {
        source = source.message_processor(processors::append_missing_messages(defaults.clone()))?;
    }

    let store = TranslationStore::new(config.store_key()?);
    store.set_default_locale(config.store.default_locale.clone());

    let mut loaded_locales = Vec::new();
    source.load(|loaded| {
        loaded_locales.push(loaded.locale().clone());
        store.register_all(loaded.locale(), loaded.message_map())
    })?;

    // ファイルの無いデフォルトロケールはデフォルトメッセージで補う
    if let Some(defaults) = &defaults {
        for default_locale in &config.source.default_locales {
            if !loaded_locales.contains(default_locale) {
                store.register_all(default_locale, defaults)?;
                loaded_locales.push(default_locale.clone());
            }
        }
    }

    let store = Arc::new(store);
    GlobalTranslator::translator().add_source(store.clone());

    if !store.contains(key) {
        eprintln!(
            "{}",
            fmt_ui_msg(UiMsg::RenderNotFound, &[key, &locale.to_string()])
        );
        let suggestions = suggest(key, &store.keys());
        if !suggestions.is_empty() {
            eprintln!("{}", fmt_ui_msg(UiMsg::DidYouMean, &[&suggestions.join(", ")]));
        }
        return Ok(ExitCode::FAILURE);
    }

    let args = args.iter().map(Component::text).collect();
    let component = Component::translatable_with_args(key, args);
    let rendered = GlobalTranslator::translator().render(&component, locale);
    println!("{}", rendered.to_plain_text());

    Ok(ExitCode::SUCCESS)
}

/// 編集距離の近いキーを最大3件
fn suggest(target: &str, keys: &[String]) -> Vec<String> {
    let mut candidates: Vec<(usize, &String)> = keys
        .iter()
        .map(|key| (strsim::levenshtein(target, key), key))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .collect();
    candidates.sort();
    candidates.into_iter().take(3).map(|(_, key)| key.clone()).collect()
}
