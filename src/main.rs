use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use callsigns::callsign::normalize;
use callsigns::config::AppConfig;
use callsigns::context::AppContext;
use callsigns::license::LicenseRecord;
use callsigns::lookup::{LookupOutcome, LookupState, RegistryLicense};
use callsigns::reference::vanity;
use callsigns::Result;

const DEFAULT_CONFIG_FILE: &str = "callsigns.toml";

/// Amateur radio call sign lookup
#[derive(Parser, Debug)]
#[command(name = "callsigns", version)]
struct Cli {
    /// TOML configuration file (default: ./callsigns.toml when present)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a call sign (cache first, then the lookup service)
    Lookup {
        call_sign: String,
        /// On a miss, query the FCC License View registry
        #[arg(long)]
        fcc: bool,
    },
    /// List previous lookups, oldest first
    History,
    /// Check a call sign against the FCC reserved shapes
    Reserved { call_sign: String },
    /// Download and unpack the FCC bulk database, importing the given call signs
    Sync { call_signs: Vec<String> },
    /// Import call signs from unpacked AM/HD/EN files in DIR
    Import {
        dir: PathBuf,
        #[arg(required = true)]
        call_signs: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging - default level comes from config, RUST_LOG overrides
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    match run(cli.command, config).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default.exists() {
                AppConfig::from_file(&default)
            } else {
                Ok(AppConfig::default())
            }
        }
    }
}

async fn run(command: Commands, config: AppConfig) -> Result<ExitCode> {
    // Reserved-shape checks need neither the database nor the network
    if let Commands::Reserved { call_sign } = &command {
        print_reserved(&normalize(call_sign));
        return Ok(ExitCode::SUCCESS);
    }

    let mut ctx = AppContext::init(config).await?;

    match command {
        Commands::Lookup { call_sign, fcc } => {
            let mut state = ctx.lookups.lookup(&call_sign).await?.clone();
            if fcc && state.awaits_fallback() {
                if let LookupState::Failed { detail, .. } = &state {
                    println!("{}", detail);
                }
                state = ctx.lookups.fallback_lookup().await?.clone();
            }
            Ok(print_state(&state))
        }
        Commands::History => {
            for entry in ctx.lookups.history().all() {
                if entry.display_name.is_empty() {
                    println!("{}", entry.call_sign);
                } else {
                    println!("{} ({})", entry.call_sign, entry.display_name);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Sync { call_signs } => {
            let calls: Vec<String> = call_signs.iter().map(|c| normalize(c)).collect();
            let imported = ctx.sync(&calls).await?;
            println!("Imported {} call signs", imported);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Import { dir, call_signs } => {
            let calls: Vec<String> = call_signs.iter().map(|c| normalize(c)).collect();
            let imported = ctx.import_bulk(&dir, &calls).await?;
            println!("Imported {} of {} call signs", imported, calls.len());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Reserved { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn print_state(state: &LookupState) -> ExitCode {
    match state {
        LookupState::Succeeded { outcome: LookupOutcome::Registry(license), .. } => {
            print_registry(license);
            ExitCode::SUCCESS
        }
        LookupState::Succeeded { call_sign, outcome } => {
            match outcome.current_record() {
                Some(record) => print_record(record, outcome.records().len()),
                None => println!("{}: no records", call_sign),
            }
            ExitCode::SUCCESS
        }
        LookupState::Failed { call_sign, detail, .. } => {
            println!("Call sign {} not found: {}", call_sign, detail);
            ExitCode::FAILURE
        }
        LookupState::Idle => {
            println!("Nothing to look up");
            ExitCode::FAILURE
        }
        other => {
            println!("Lookup did not finish ({})", other.name());
            ExitCode::FAILURE
        }
    }
}

fn print_record(record: &LicenseRecord, record_count: usize) {
    println!("{}", record.heading());
    println!("{}", record.mailing_address());
    println!();
    println!("Status:          {}", record.status.description());
    if let Some(class) = &record.operator_class {
        println!("Operator class:  {}", class.description());
    }
    if let Some(frn) = &record.frn {
        println!("FRN:             {}", frn);
    }
    if let Some(granted) = &record.grant_date {
        println!("Granted:         {}", granted);
    }
    if let Some(expires) = &record.expired_date {
        println!("Expires:         {}", expires);
    }
    if let Some(previous) = &record.previous_call_sign {
        println!("Previous call:   {}", previous);
    }
    if let Some(trustee) = &record.trustee_call_sign {
        println!("Trustee:         {}", trustee);
    }
    if let Ok(phonetic) = record.phonetic() {
        println!("Phonetic:        {}", phonetic);
    }
    if let Ok(morse) = record.call_sign_morse() {
        println!("Morse:           {}", morse);
    }
    if let Ok(syllables) = record.syllable_length() {
        println!("Syllables:       {}", syllables);
    }
    let format = record.format();
    if !format.is_empty() {
        println!("Format:          {}", format);
    }
    println!("FCC ULS:         {}", record.fcc_uls_link());
    println!("QRZ:             {}", record.qrz_call_sign_link());
    if record_count > 1 {
        println!("({} license records on file, showing the latest)", record_count);
    }
}

fn print_registry(license: &RegistryLicense) {
    println!("Call sign {} found in the FCC registry", license.call_sign);
    println!("Name:     {}", license.name);
    println!("Status:   {}", license.status);
    println!("Expires:  {}", license.expired_date);
    println!("See FCC profile page for full details: {}", license.detail_url);
}

fn print_reserved(call_sign: &str) {
    match vanity::matching_rule(call_sign) {
        Some(rule) => println!("{} is reserved: {}", call_sign, rule.description),
        None => println!("{} is not in a reserved shape", call_sign),
    }
    let format = callsigns::license::derived::format(call_sign);
    if !format.is_empty() {
        println!("Format:    {}", format);
    }
    match callsigns::license::derived::phonetic(call_sign) {
        Ok(phonetic) => println!("Phonetic:  {}", phonetic),
        Err(e) => println!("Phonetic:  {}", e),
    }
    if let Ok(syllables) = callsigns::license::derived::syllable_length(call_sign) {
        println!("Syllables: {}", syllables);
    }
}
