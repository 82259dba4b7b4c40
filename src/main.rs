mod cli;

use van_scout::error::AppError;
use van_scout::workflows::listings::LoadError;

fn main() {
    match cli::run() {
        Ok(()) => {}
        Err(AppError::Load(LoadError::MissingInput { path })) => {
            println!("{}", cli::missing_input_message(&path));
        }
        Err(other) => {
            eprintln!("application error: {other}");
            std::process::exit(1);
        }
    }
}
