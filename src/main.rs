use std::time::Duration;

use log::info;
use structopt::StructOpt;

use tailspin_api::app::app;
use tailspin_api::server::{Server, TcpServer};

#[derive(Debug, StructOpt)]
#[structopt(name = "tailspin-api", about = "Mock product catalog API server.")]
struct Opt {
    #[structopt(short, long, default_value = "3000")]
    port: u16,
    #[structopt(long, default_value = "4")]
    threads: usize,
    #[structopt(long, default_value = "10")]
    timeout: u64,
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,
}

fn timeout(seconds: u64) -> Option<Duration> {
    if seconds == 0 {
        None
    } else {
        Some(Duration::from_secs(seconds))
    }
}

fn main() {
    let opt = Opt::from_args();

    stderrlog::new()
        .module(module_path!())
        .module("tailspin_api")
        .verbosity(opt.verbose)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
        .unwrap();

    let bind = format!("0.0.0.0:{}", opt.port);
    let mut server = TcpServer::new(&bind, opt.threads, timeout(opt.timeout), app()).unwrap();
    info!("listening on {}", &bind);
    println!("Server running on port: http://localhost:{}", opt.port);
    server.serve_forever();
}
