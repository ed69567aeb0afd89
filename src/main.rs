use std::process::ExitCode;

use exe_to_sb3::action::cli::process_args;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(Some(output)) => {
            log::info!("程式執行完成，輸出檔案：{}", output.display());
            println!("轉換完成！輸出檔案位於：{}", output.display());
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("錯誤：{}", e);
            ExitCode::FAILURE
        }
    }
}
