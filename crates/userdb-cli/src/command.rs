use userdb_core::{
    query::AgeRange,
    service::{CreateReq, GetReq, SearchAgeReq, SearchNameReq},
    user::User,
};

pub const HELP: &str = "\
commands:
  create <age> <first> <last> [key]   store a user (key generated when omitted)
  list                                all users in key order
  get <key>                           one user by key
  search age <from> <to>              users with from <= age <= to, by age
  search name <query>                 users whose first or last name contains query
  metrics                             store counters
  help                                this text
  exit | quit                         leave the shell";

///
/// Command
///

#[derive(Debug, Eq, PartialEq)]
pub enum Command {
    Create(CreateReq),
    List,
    Get(GetReq),
    SearchAge(SearchAgeReq),
    SearchName(SearchNameReq),
    Metrics,
    Help,
    Quit,
}

/// Parse one shell line. `Err` carries a usage message.
pub fn parse(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["create", age, first, last] => Ok(Command::Create(CreateReq {
            user: User::new("", parse_int(age)?, *first, *last),
        })),
        ["create", age, first, last, key] => Ok(Command::Create(CreateReq {
            user: User::new(*key, parse_int(age)?, *first, *last),
        })),
        ["list"] => Ok(Command::List),
        ["get", key] => Ok(Command::Get(GetReq {
            key: (*key).to_string(),
        })),
        ["search", "age", from, to] => Ok(Command::SearchAge(SearchAgeReq {
            age_range: Some(AgeRange::new(parse_int(from)?, parse_int(to)?)),
        })),
        ["search", "name", query] => Ok(Command::SearchName(SearchNameReq {
            query: (*query).to_string(),
        })),
        ["metrics"] => Ok(Command::Metrics),
        ["help" | "?"] => Ok(Command::Help),
        ["exit" | "quit"] => Ok(Command::Quit),
        [] => Err("empty command".to_string()),
        [cmd, ..] => Err(format!("unknown or malformed command '{cmd}' (try 'help')")),
    }
}

fn parse_int(word: &str) -> Result<i32, String> {
    word.parse()
        .map_err(|_| format!("expected an integer, got '{word}'"))
}

///
/// TESTS
///
