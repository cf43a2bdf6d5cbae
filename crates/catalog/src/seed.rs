//! The builtin catalog served when no catalog file is configured.

use crate::types::{Catalog, Movie};

impl Catalog {
    /// The seeded catalog.
    ///
    /// Ids 17 and 19 are the same film listed twice; both entries are kept.
    pub fn builtin() -> Self {
        Self::from_movies(builtin_movies())
    }
}

fn builtin_movies() -> Vec<Movie> {
    vec![
        Movie::new(1, "Inception", "Sci-Fi", 8.8, 2010),
        Movie::new(2, "The Matrix", "Sci-Fi", 8.7, 1999),
        Movie::new(3, "Interstellar", "Sci-Fi", 8.6, 2014),
        Movie::new(4, "The Godfather", "Crime", 9.2, 1972),
        Movie::new(5, "Pulp Fiction", "Crime", 8.9, 1994),
        Movie::new(6, "The Dark Knight", "Action", 9.0, 2008),
        Movie::new(7, "Forrest Gump", "Drama", 8.8, 1994),
        Movie::new(8, "The Shawshank Redemption", "Drama", 9.3, 1994),
        Movie::new(9, "Fight Club", "Drama", 8.8, 1999),
        Movie::new(10, "Goodfellas", "Crime", 8.7, 1990),
        Movie::new(11, "Avatar", "Sci-Fi", 7.8, 2009),
        Movie::new(12, "Gladiator", "Action", 8.5, 2000),
        Movie::new(
            13,
            "The Lord of the Rings: The Fellowship of the Ring",
            "Fantasy",
            8.8,
            2001,
        ),
        Movie::new(14, "The Lord of the Rings: The Two Towers", "Fantasy", 8.7, 2002),
        Movie::new(
            15,
            "The Lord of the Rings: The Return of the King",
            "Fantasy",
            8.9,
            2003,
        ),
        Movie::new(16, "Star Wars: Episode IV - A New Hope", "Sci-Fi", 8.7, 1977),
        Movie::new(
            17,
            "Star Wars: Episode V - The Empire Strikes Back",
            "Sci-Fi",
            8.8,
            1980,
        ),
        Movie::new(18, "Star Wars: Episode VI - Return of the Jedi", "Sci-Fi", 8.7, 1983),
        Movie::new(
            19,
            "Star Wars: Episode V - The Empire Strikes Back",
            "Sci-Fi",
            8.8,
            1980,
        ),
    ]
}
