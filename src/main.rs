use std::{io::Write, path::PathBuf, time::Duration};

use clap::{Arg, ArgAction, ArgMatches, Command};
use curlreq::{Error, Request, ReqwestBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CurlPart {
    Method,
    Url,
    Header,
    Cookie,
    Body,
}

fn source_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("command")
            .help("The input curl command string")
            .required_unless_present("file")
            .conflicts_with("file")
            .index(1),
    )
    .arg(
        Arg::new("file")
            .short('f')
            .long("file")
            .value_name("PATH")
            .help("Read the curl command from a file")
            .value_parser(clap::value_parser!(PathBuf)),
    )
}

fn cli() -> Command {
    Command::new("curlreq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse curl commands into HTTP requests and send them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            source_args(Command::new("parse").about("Parses a curl command"))
                .arg(
                    Arg::new("part")
                        .short('p')
                        .long("part")
                        .value_name("PART")
                        .help("Only print one part of the request (method, url, header, cookie, body)")
                        .value_parser(clap::value_parser!(CurlPart)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the parsed request as JSON")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("part"),
                ),
        )
        .subcommand(
            source_args(
                Command::new("exec").about("Parses a curl command and sends the request"),
            )
            .arg(
                Arg::new("timeout")
                    .short('t')
                    .long("timeout")
                    .value_name("SECS")
                    .help("Overall request timeout in seconds")
                    .default_value("30")
                    .value_parser(clap::value_parser!(u64)),
            ),
        )
}

fn load_request(matches: &ArgMatches) -> Result<Request, Error> {
    match matches.get_one::<PathBuf>("file") {
        Some(path) => Request::parse_file(path),
        None => {
            let command = matches
                .get_one::<String>("command")
                .map(String::as_str)
                .unwrap_or_default();
            Request::parse(command)
        }
    }
}

fn sorted(map: &std::collections::HashMap<String, String>) -> Vec<(&String, &String)> {
    let mut pairs: Vec<_> = map.iter().collect();
    pairs.sort();
    pairs
}

fn print_part(request: &Request, part: CurlPart) {
    match part {
        CurlPart::Method => println!("{}", request.method),
        CurlPart::Url => println!("{}", request.url),
        CurlPart::Header => {
            for (name, value) in sorted(&request.headers) {
                println!("{name}: {value}");
            }
        }
        CurlPart::Cookie => {
            for (name, value) in sorted(&request.cookies) {
                println!("{name}={value}");
            }
        }
        CurlPart::Body => println!("{}", request.body),
    }
}

fn run(matches: ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        Some(("parse", sub_matches)) => {
            let request = load_request(sub_matches)?;
            if let Some(part) = sub_matches.get_one::<CurlPart>("part") {
                print_part(&request, *part);
            } else if sub_matches.get_flag("json") {
                println!("{}", request.to_json()?);
            } else {
                println!("{:#?}", request);
            }
        }
        Some(("exec", sub_matches)) => {
            let request = load_request(sub_matches)?;
            let timeout = sub_matches.get_one::<u64>("timeout").copied().unwrap_or(30);
            let backend = ReqwestBackend::new(Duration::from_secs(timeout))?;
            let body = request.execute_with(&backend)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&body)?;
            stdout.flush()?;
        }
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(cli().get_matches()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
