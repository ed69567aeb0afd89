use std::io;
use std::path::PathBuf;
use clap::Parser;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::Cli;
use crate::config::settings::Settings;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::service::config_service::{settings_path_from, CliConfigAdapter};
use crate::service::converter::Converter;
use crate::utils::utils::setup_logging;

/// 回傳產生的 .sb3 路徑；只查看歷史紀錄時回傳 `None`
pub fn process_args(args: Vec<String>) -> io::Result<Option<PathBuf>> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode(Cli::parse_from(args))
    }
}

pub fn process_cli_mode(cli: Cli) -> io::Result<Option<PathBuf>> {
    setup_logging(&cli.log_level)?;

    if cli.history {
        let settings = Settings::load(&settings_path_from(cli.settings.as_deref()));
        println!("{}", settings.describe_history());
        return Ok(None);
    }

    log::info!("命令列模式，輸入檔案：{:?}，輸出目錄：{:?}", cli.input, cli.output);
    let facade = ConversionFacade::new(
        Box::new(CliConfigAdapter::new(cli)),
        Box::new(Converter::new()),
    );
    let output = facade.execute_conversion()?;
    Ok(Some(output.output_path))
}
