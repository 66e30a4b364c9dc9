//! Luna CLI.

fn main() {
    lunac::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    match lunac::run(&args, &mut stdout, &mut stderr) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("Run 'lunac help' for usage.");
            std::process::exit(2);
        }
    }
}
