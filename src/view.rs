use crate::controller::{NoticeKind, SessionController};
use crate::star::StarRating;

const TITLE: &str = "Movie Recommendation System";

/// Render the whole screen for the controller's current state.
pub fn render(state: &SessionController) -> String {
    let mut out = vec![TITLE.to_string(), "=".repeat(TITLE.len())];

    let session = state.session();
    if !session.is_logged_in {
        render_login(state, &mut out);
    } else {
        out.push(format!("Welcome, {}!", session.username));
        if session.is_admin {
            render_admin(state, &mut out);
        } else {
            render_recommendations(state, &mut out);
            render_user_ratings(state, &mut out);
            // Only reachable through a refused admin action.
            if let Some(message) = state.admin_message() {
                out.push(String::new());
                out.push(message.to_string());
            }
        }
        out.push(String::new());
        out.push("Type `logout` to log out.".to_string());
    }

    out.join("\n")
}

fn render_login(state: &SessionController, out: &mut Vec<String>) {
    out.push(String::new());
    out.push("Login".to_string());
    out.push("  login <username> <password>".to_string());
    out.push("  register <username> <password> [admin]".to_string());
    if let Some(message) = state.message() {
        out.push(message.to_string());
    }
}

fn render_admin(state: &SessionController, out: &mut Vec<String>) {
    let draft = state.new_movie();
    out.push("You are logged in as an admin.".to_string());
    out.push(String::new());
    out.push("Add New Movie".to_string());
    out.push(format!("  Movie Title: {}", draft.title));
    out.push(format!("  Genres (separate with |): {}", draft.genres));
    out.push("  title <text> | genres <text> | add-movie | delete-movie <movieId>".to_string());
    if let Some(message) = state.admin_message() {
        out.push(message.to_string());
    }
}

fn render_recommendations(state: &SessionController, out: &mut Vec<String>) {
    out.push(String::new());
    out.push("Your Recommendations".to_string());
    out.push("  recommend | rate <movieId> <1-5>".to_string());

    if let Some(notice) = state.recommendation_notice() {
        out.push(match notice.kind {
            NoticeKind::Error => format!("Error: {}", notice.text),
            NoticeKind::Info => notice.text.clone(),
        });
    } else if !state.recommendations().is_empty() {
        for movie in state.recommendations() {
            let mut line = movie_line(movie.movie_id, &movie.title, &movie.genres);
            // A prediction of exactly zero is treated as no prediction.
            if let Some(predicted) = movie.predicted_rating.filter(|p| *p != 0.0) {
                line.push_str(&format!("  Predicted Rating: {:.1}", predicted));
            }
            out.push(line);
            out.push(star_line(&state.star_for(movie.movie_id)));
        }
    } else {
        out.push("Type `recommend` to fetch recommendations.".to_string());
    }

    if let Some(message) = state.rating_message() {
        out.push(message.to_string());
    }
}

fn render_user_ratings(state: &SessionController, out: &mut Vec<String>) {
    out.push(String::new());
    out.push("Your Rated Movies".to_string());

    if state.user_ratings().is_empty() {
        out.push("You haven't rated any movies yet.".to_string());
        return;
    }
    for movie in state.user_ratings() {
        let mut line = movie_line(movie.movie_id, &movie.title, &movie.genres);
        line.push_str(&format!("  Current Rating: {}", movie.rating));
        out.push(line);
        out.push(star_line(&StarRating::new(movie.movie_id, movie.rating)));
    }
}

fn movie_line(movie_id: i64, title: &str, genres: &str) -> String {
    format!("  [{}] {}  ({})", movie_id, title, genres)
}

fn star_line(star: &StarRating) -> String {
    format!("      {}", star)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::*;
    use crate::api::UserId;
    use std::sync::Arc;

    async fn logged_in(fake: FakeBackend) -> SessionController {
        let mut c = SessionController::new(Arc::new(fake));
        c.login("ann", "pw").await;
        c
    }

    #[test]
    fn test_login_screen() {
        let c = SessionController::new(Arc::new(FakeBackend::default()));
        let screen = render(&c);
        assert!(screen.contains("login <username> <password>"));
        assert!(!screen.contains("Welcome"));
    }

    #[tokio::test]
    async fn test_admin_sees_only_add_movie_form() {
        let mut c = logged_in(FakeBackend {
            login: login_ok(UserId::Number(1), true),
            ..Default::default()
        })
        .await;
        c.set_new_movie_title("Alien");
        let screen = render(&c);
        assert!(screen.contains("Welcome, ann!"));
        assert!(screen.contains("You are logged in as an admin."));
        assert!(screen.contains("Add New Movie"));
        assert!(screen.contains("Movie Title: Alien"));
        assert!(!screen.contains("Your Recommendations"));
        assert!(!screen.contains("Your Rated Movies"));
    }

    #[tokio::test]
    async fn test_member_sections() {
        let mut c = logged_in(FakeBackend {
            login: login_ok(UserId::Number(1), false),
            recommendations: Canned::Ok(vec![
                recommendation(1, "Toy Story (1995)", Some(4.16)),
                recommendation(2, "Heat (1995)", None),
            ]),
            user_ratings: Canned::Ok(vec![rating(2, "Heat (1995)", 3)]),
            ..Default::default()
        })
        .await;

        let screen = render(&c);
        assert!(screen.contains("Type `recommend` to fetch recommendations."));
        assert!(screen.contains("[2] Heat (1995)  (Drama)  Current Rating: 3"));
        assert!(!screen.contains("Add New Movie"));

        c.fetch_recommendations().await;
        let screen = render(&c);
        assert!(screen.contains("[1] Toy Story (1995)  (Drama)  Predicted Rating: 4.2"));
        assert!(screen.contains("      ☆☆☆☆☆"));
        // Stars in the recommendation list come from the ratings lookup.
        assert_eq!(screen.matches("★★★☆☆").count(), 2);
    }

    #[tokio::test]
    async fn test_notices() {
        let mut c = logged_in(FakeBackend {
            login: login_ok(UserId::Number(1), false),
            ..Default::default()
        })
        .await;
        c.fetch_recommendations().await;
        let screen = render(&c);
        assert!(screen.contains("No recommendations available at this time."));
        assert!(!screen.contains("Error:"));
        assert!(screen.contains("You haven't rated any movies yet."));

        let mut c = logged_in(FakeBackend {
            login: login_ok(UserId::Number(1), false),
            recommendations: Canned::Protocol,
            ..Default::default()
        })
        .await;
        c.fetch_recommendations().await;
        assert!(render(&c).contains("Error: Invalid recommendation data received."));
    }
}
