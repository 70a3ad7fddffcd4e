use std::fmt;

pub const MAX_STARS: u8 = 5;

const FILLED: char = '★';
const EMPTY: char = '☆';

/// A 1-5 star selector for one movie.
///
/// The displayed value is local to the control: a selection shows up
/// immediately and is reported through the callback, without waiting for
/// the backend to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarRating {
    movie_id: i64,
    rating: u8,
}

impl StarRating {
    /// `initial` of 0 means unrated.
    pub fn new(movie_id: i64, initial: u8) -> Self {
        Self {
            movie_id,
            rating: initial.min(MAX_STARS),
        }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Select `star` and hand `(movie_id, star)` to `on_rate`.
    ///
    /// Returns `None`, leaving the display alone, when `star` is not 1-5.
    pub fn select<F, R>(&mut self, star: u8, on_rate: F) -> Option<R>
    where
        F: FnOnce(i64, u8) -> R,
    {
        if !(1..=MAX_STARS).contains(&star) {
            return None;
        }
        self.rating = star;
        Some(on_rate(self.movie_id, star))
    }

    pub fn render(&self) -> String {
        (1..=MAX_STARS)
            .map(|star| if star <= self.rating { FILLED } else { EMPTY })
            .collect()
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
