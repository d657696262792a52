//! A simple CLI tool for operators to mint authentication tokens.
//! Tokens are signed with the same configuration the server loads, so a token
//! minted here is accepted by a server started from the same directory.

use clap::{Arg, ArgAction, ArgMatches, Command};

use voting_backend::{
    model::auth::{Admin, AuthToken, Voter},
    Config,
};
use voting_session::VoterId;

const PROGRAM_NAME: &str = "token-cli";

const ABOUT_TEXT: &str = "Mint authentication tokens for the voting backend.

The printed token is the value of the `auth_token` cookie.

EXIT CODES:
     0: Success.
     1: Error.";

const MINT: &str = "mint";
const IDENTITY: &str = "identity";
const IDENTITY_ARG: &str = "IDENTITY";
const ADMIN_FLAG: &str = "admin";

const IDENTITY_ARG_HELP: &str = "The identity to mint a token for,\n\
as `0x` followed by 40 hex digits";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .subcommand(
            Command::new(MINT)
                .about("Print a signed token for an identity")
                .arg(
                    Arg::new(IDENTITY_ARG)
                        .help(IDENTITY_ARG_HELP)
                        .action(ArgAction::Set)
                        .required(true),
                )
                .arg(
                    Arg::new(ADMIN_FLAG)
                        .long(ADMIN_FLAG)
                        .help("Grant administrator rights instead of voter rights")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new(IDENTITY).about("Print a freshly generated random identity"))
}

/// Errors that this program may produce.
#[derive(Debug, Eq, PartialEq)]
enum Error {
    /// The server configuration could not be loaded.
    Config(String),
    /// The identity argument was malformed.
    Identity(String),
    /// Signing failed.
    Token(String),
}

/// Sign a token for `identity`, with administrator rights if `admin` is set.
fn mint(config: &Config, identity: &str, admin: bool) -> Result<String, Error> {
    let id: VoterId = identity
        .parse()
        .map_err(|e| Error::Identity(format!("{e}")))?;
    let token = if admin {
        AuthToken::<Admin>::new(id).encode(config)
    } else {
        AuthToken::<Voter>::new(id).encode(config)
    };
    token.map_err(|e| Error::Token(e.to_string()))
}

fn random_identity() -> VoterId {
    VoterId::from_bytes(rand::random())
}

/// Run the requested subcommand, report the result, and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    let result = match args.subcommand() {
        Some((MINT, sub_args)) => {
            let identity: &String = sub_args.get_one(IDENTITY_ARG).unwrap(); // Required argument is guaranteed to be present.
            let admin = sub_args.get_flag(ADMIN_FLAG);
            Config::from_env()
                .map_err(|e| Error::Config(e.to_string()))
                .and_then(|config| mint(&config, identity, admin))
        }
        Some((IDENTITY, _)) => Ok(random_identity().to_string()),
        _ => unreachable!("subcommand is required"),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(Error::Config(msg)) => {
            eprintln!("Failed to load configuration: {msg}");
            1
        }
        Err(Error::Identity(msg)) => {
            eprintln!("Invalid identity: {msg}");
            1
        }
        Err(Error::Token(msg)) => {
            eprintln!("Failed to sign token: {msg}");
            1
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args);
    std::process::exit(exit_code.into())
}
