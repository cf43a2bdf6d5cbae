//! Text rendering of the client view.
//!
//! Everything here is a pure function of [`ClientView`]; printing is left
//! to the caller.

use catalog::Movie;
use colored::Colorize;
use recommender_client::Recommendation;

use crate::view::ClientView;

pub fn render(view: &ClientView) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "MovieRec".bold().blue()));
    out.push_str(&search_control(view));
    out.push('\n');

    if !view.movies().is_empty() {
        out.push('\n');
        for movie in view.movies() {
            out.push_str(&movie_card(movie));
        }
    }

    if !view.recommendations().is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", "Recommendations for you".bold().blue()));
        for (rank, rec) in view.recommendations().iter().enumerate() {
            out.push_str(&recommendation_card(rank + 1, rec));
        }
    }

    out
}

fn search_control(view: &ClientView) -> String {
    let button = if view.is_loading() {
        "Searching...".yellow()
    } else {
        "Search".green()
    };
    format!("[{}] {}", view.search_query(), button)
}

fn movie_card(movie: &Movie) -> String {
    format!(
        "{:>3}. {}\n     {} | {}/10\n",
        movie.id,
        movie.title.bold(),
        movie.genre.cyan(),
        movie.rating
    )
}

fn recommendation_card(rank: usize, rec: &Recommendation) -> String {
    format!(
        "{:>3}. {}\n     {} | Score: {}%\n",
        rank.to_string().green(),
        rec.title.bold(),
        rec.genre.cyan(),
        rec.similarity_score
    )
}
