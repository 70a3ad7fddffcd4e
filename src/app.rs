use std::io::Write;
use std::sync::Arc;
use tracing::debug;

use crate::api::Backend;
use crate::command::{Command, USAGE};
use crate::controller::{SessionController, RATING_OUT_OF_RANGE};
use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Routes commands to the controller and redraws the screen after each one.
///
/// Which commands do anything depends on the screen: the login screen,
/// the admin screen or the member screen.
pub struct App {
    controller: SessionController,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            controller: SessionController::new(backend),
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn render(&self) -> String {
        view::render(&self.controller)
    }

    pub async fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> std::io::Result<Outcome> {
        debug!(command = cmd.name(), "Handling command");
        let session = self.controller.session();
        let logged_in = session.is_logged_in;
        let admin = session.is_admin;

        match cmd {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => {
                writeln!(out, "{}", USAGE)?;
                return Ok(Outcome::Continue);
            }
            Command::Show => {}
            Command::Login { username, password } if !logged_in => {
                self.controller.login(&username, &password).await;
            }
            Command::Register {
                username,
                password,
                admin,
            } if !logged_in => {
                self.controller.register(&username, &password, admin).await;
            }
            Command::Logout if logged_in => self.controller.logout(),
            Command::Recommend if logged_in && !admin => {
                self.controller.fetch_recommendations().await;
            }
            Command::Ratings if logged_in && !admin => {
                self.controller.fetch_user_ratings().await;
            }
            Command::Rate { movie_id, stars } if logged_in && !admin => {
                let mut star = self.controller.star_for(movie_id);
                let controller = &mut self.controller;
                let submit = star.select(stars, move |movie_id, rating| async move {
                    controller.submit_rating(movie_id, rating).await
                });
                match submit {
                    Some(submit) => {
                        // The selection is shown before the backend answers.
                        writeln!(out, "  [{}] {}", star.movie_id(), star)?;
                        out.flush()?;
                        submit.await;
                    }
                    None => {
                        writeln!(out, "{}", RATING_OUT_OF_RANGE)?;
                        return Ok(Outcome::Continue);
                    }
                }
            }
            Command::Title(title) if admin => self.controller.set_new_movie_title(&title),
            Command::Genres(genres) if admin => self.controller.set_new_movie_genres(&genres),
            // Both admin actions carry their own authorization message.
            Command::AddMovie if logged_in => self.controller.add_movie().await,
            Command::DeleteMovie(movie_id) if logged_in => {
                self.controller.delete_movie(movie_id).await;
            }
            _ => {
                writeln!(out, "That command is not available on this screen.")?;
                return Ok(Outcome::Continue);
            }
        }

        writeln!(out, "{}", self.render())?;
        Ok(Outcome::Continue)
    }
}
