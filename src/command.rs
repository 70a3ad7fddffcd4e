/// A single line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Register { username: String, password: String, admin: bool },
    Logout,
    Recommend,
    Ratings,
    Rate { movie_id: i64, stars: u8 },
    Title(String),
    Genres(String),
    AddMovie,
    DeleteMovie(i64),
    Show,
    Help,
    Quit,
}

pub const USAGE: &str = "\
Commands:
  login <username> <password>
  register <username> <password> [admin]
  logout
  recommend                 fetch recommendations
  ratings                   refresh your rated movies
  rate <movieId> <1-5>
  title <text>              set the new movie title (admin)
  genres <text>             set the new movie genres, separated by | (admin)
  add-movie                 submit the new movie (admin)
  delete-movie <movieId>    (admin)
  show
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command: {0}. Type `help` for a list of commands.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Register { .. } => "register",
            Command::Logout => "logout",
            Command::Recommend => "recommend",
            Command::Ratings => "ratings",
            Command::Rate { .. } => "rate",
            Command::Title(_) => "title",
            Command::Genres(_) => "genres",
            Command::AddMovie => "add-movie",
            Command::DeleteMovie(_) => "delete-movie",
            Command::Show => "show",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let cmd = match name {
            "" => return Ok(None),
            "login" => match args.as_slice() {
                [username, password] => Command::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                },
                _ => return Err(ParseError::Usage("login <username> <password>")),
            },
            "register" => match args.as_slice() {
                [username, password] => Command::Register {
                    username: username.to_string(),
                    password: password.to_string(),
                    admin: false,
                },
                [username, password, "admin"] => Command::Register {
                    username: username.to_string(),
                    password: password.to_string(),
                    admin: true,
                },
                _ => return Err(ParseError::Usage("register <username> <password> [admin]")),
            },
            "logout" => Command::Logout,
            "recommend" | "recs" => Command::Recommend,
            "ratings" => Command::Ratings,
            "rate" => match args.as_slice() {
                [movie_id, stars] => {
                    match (movie_id.parse(), stars.parse::<i64>()) {
                        // Anything that is not 0-255 becomes 0 and is refused as out of range.
                        (Ok(movie_id), Ok(stars)) => Command::Rate {
                            movie_id,
                            stars: u8::try_from(stars).unwrap_or(0),
                        },
                        _ => return Err(ParseError::Usage("rate <movieId> <1-5>")),
                    }
                }
                _ => return Err(ParseError::Usage("rate <movieId> <1-5>")),
            },
            "title" => Command::Title(rest.to_string()),
            "genres" => Command::Genres(rest.to_string()),
            "add-movie" => Command::AddMovie,
            "delete-movie" => match args.as_slice() {
                [movie_id] => match movie_id.parse() {
                    Ok(movie_id) => Command::DeleteMovie(movie_id),
                    Err(_) => return Err(ParseError::Usage("delete-movie <movieId>")),
                },
                _ => return Err(ParseError::Usage("delete-movie <movieId>")),
            },
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(
            Command::parse("login ann secret"),
            Ok(Some(Command::Login {
                username: "ann".into(),
                password: "secret".into()
            }))
        );
        assert_eq!(
            Command::parse("register root pw admin"),
            Ok(Some(Command::Register {
                username: "root".into(),
                password: "pw".into(),
                admin: true
            }))
        );
        assert_eq!(
            Command::parse("rate 7 4"),
            Ok(Some(Command::Rate {
                movie_id: 7,
                stars: 4
            }))
        );
        assert_eq!(
            Command::parse("rate 7 300"),
            Ok(Some(Command::Rate {
                movie_id: 7,
                stars: 0
            }))
        );
        assert_eq!(
            Command::parse("rate 7 -2"),
            Ok(Some(Command::Rate {
                movie_id: 7,
                stars: 0
            }))
        );
        assert_eq!(Command::parse("recs"), Ok(Some(Command::Recommend)));
        assert_eq!(Command::parse("delete-movie 12"), Ok(Some(Command::DeleteMovie(12))));
    }

    #[test]
    fn test_free_text_arguments() {
        assert_eq!(
            Command::parse("title  The Good, the Bad and the Ugly "),
            Ok(Some(Command::Title("The Good, the Bad and the Ugly".into())))
        );
        assert_eq!(
            Command::parse("genres Action|Western"),
            Ok(Some(Command::Genres("Action|Western".into())))
        );
        assert_eq!(Command::parse("title"), Ok(Some(Command::Title(String::new()))));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("login ann"),
            Err(ParseError::Usage("login <username> <password>"))
        );
        assert_eq!(
            Command::parse("rate seven 4"),
            Err(ParseError::Usage("rate <movieId> <1-5>"))
        );
        assert_eq!(
            Command::parse("register a b root"),
            Err(ParseError::Usage("register <username> <password> [admin]"))
        );
        assert_eq!(
            Command::parse("dance"),
            Err(ParseError::Unknown("dance".into()))
        );
    }
}
