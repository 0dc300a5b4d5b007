//! Netflix movie durations.

use crate::data::{i64_values, string_values, DataLoader};
use crate::surface::{DisplaySurface, Figure, FigureKind, PointSeries, TablePreview};
use anyhow::Context;
use polars::prelude::*;

const NETFLIX_FILE: &str = "netflix_data.csv";

/// Average movie durations for 2011-2020, as provided with the brief.
const YEARS: [i32; 10] = [2011, 2012, 2013, 2014, 2015, 2016, 2017, 2018, 2019, 2020];
const DURATIONS: [i32; 10] = [103, 101, 99, 100, 100, 95, 95, 96, 93, 90];

const MOVIE_COLUMNS: [&str; 5] = ["title", "country", "genre", "release_year", "duration"];

/// Movies shorter than this (minutes) are listed as short.
const SHORT_MOVIE_MINUTES: i64 = 60;

/// Genres highlighted in the coloured scatter, with their colours.
const HIGHLIGHTED_GENRES: [(&str, [u8; 3]); 3] = [
    ("Children", [255, 0, 0]),
    ("Documentaries", [0, 0, 255]),
    ("Stand-Up", [0, 128, 0]),
];
const OTHER_GENRES_COLOR: [u8; 3] = [0, 0, 0];

/// Release year / duration points of `movies`.
fn duration_points(movies: &DataFrame) -> anyhow::Result<Vec<(Option<String>, [f64; 2])>> {
    let genres = string_values(movies, "genre")?;
    let years = i64_values(movies, "release_year")?;
    let durations = i64_values(movies, "duration")?;

    Ok(genres
        .into_iter()
        .zip(years)
        .zip(durations)
        .filter_map(|((genre, year), duration)| {
            Some((genre, [year? as f64, duration? as f64]))
        })
        .collect())
}

/// Split points into the highlighted genres plus everything else.
fn series_by_genre(points: &[(Option<String>, [f64; 2])]) -> Vec<PointSeries> {
    let mut series: Vec<PointSeries> = HIGHLIGHTED_GENRES
        .iter()
        .map(|(genre, rgb)| PointSeries::new(*genre, Vec::new()).with_color(*rgb))
        .collect();
    let mut other = PointSeries::new("Other", Vec::new()).with_color(OTHER_GENRES_COLOR);

    for (genre, point) in points {
        let slot = genre
            .as_deref()
            .and_then(|g| HIGHLIGHTED_GENRES.iter().position(|(h, _)| *h == g));
        match slot {
            Some(i) => series[i].points.push(*point),
            None => other.points.push(*point),
        }
    }

    series.push(other);
    series
}

pub fn render(loader: &DataLoader, surface: &mut dyn DisplaySurface) -> anyhow::Result<()> {
    surface.markdown(
        "
        # Investigating Netflix Movies and Guest Stars in The Office

        Netflix! What started in 1997 as a DVD rental service has since exploded into the largest entertainment/media company by market capitalization, boasting over 200 million subscribers as of January 2021.

        Given the large number of movies and series available on the platform, it is a perfect opportunity to dive into the entertainment industry. For their first order of business, they have been performing some analyses, and they believe that the average duration of movies has been declining.

        As evidence of this, they have provided us with the following information. For the years from 2011 to 2020, the average movie durations are 103, 101, 99, 100, 100, 95, 95, 96, 93, and 90, respectively.
        ",
    );

    let netflix_df = loader
        .load_csv(NETFLIX_FILE)
        .with_context(|| format!("loading {}", NETFLIX_FILE))?;

    let trend: Vec<[f64; 2]> = YEARS
        .iter()
        .zip(DURATIONS.iter())
        .map(|(&y, &d)| [y as f64, d as f64])
        .collect();
    surface.figure(
        Figure::new(
            "Netflix Movie Durations 2011-2020",
            FigureKind::Lines {
                series: vec![PointSeries::new("average duration", trend)],
            },
        )
        .with_labels("Release Year", "Duration (min)"),
    );

    surface.markdown(
        "
        ## Loading the rest of the data

        Well, it looks like there is something to the idea that movie lengths have decreased over the past ten years! But equipped only with our aggregations, we're limited in the further explorations we can perform. There are a few questions about this trend that we are currently unable to answer, including:

        - What does this trend look like over a longer period of time?
        - Is this explainable by something like the genre of entertainment?

        We need to access to the CSV file and create a DataFrame with our data.
        ",
    );
    surface.table(TablePreview::from_frame(&netflix_df, 5));

    surface.markdown(
        "
        ## Filtering for movies!

        Now we can dive in and start looking at movie lengths.

        Looking at the first five rows of our new DataFrame, we notice a column type. Scanning the column, it's clear there are also TV shows in the dataset! Moreover, the duration column we planned to use seems to represent different values depending on whether the row is a movie or a show (perhaps the number of minutes versus the number of seasons)?

        Filtering our data, we selected rows where type is Movie. While we're at it, we don't need information from all of the columns, so let's create a new DataFrame containing only title, country, genre, release_year, and duration.
        ",
    );

    let movies = netflix_df
        .clone()
        .lazy()
        .filter(col("type").eq(lit("Movie")))
        .select(MOVIE_COLUMNS.iter().map(|c| col(*c)).collect::<Vec<_>>())
        .collect()?;
    surface.table(TablePreview::from_frame(&movies, 5));

    surface.markdown(
        "
        ## Creating a scatter plot

        Let's try visualizing the data again to inspect the data over a longer range of time.
        ",
    );

    let points = duration_points(&movies)?;
    surface.figure(
        Figure::new(
            "Movie Duration by Year of Release",
            FigureKind::Scatter {
                series: vec![PointSeries::new(
                    "movies",
                    points.iter().map(|(_, p)| *p).collect(),
                )],
            },
        )
        .with_labels("Release Year", "Duration"),
    );

    surface.markdown(
        "
        ## Digging deeper

        This is already much more informative than the simple plot we created with our first data. We can also see that, while newer movies are overrepresented on the platform, many short movies have been released in the past two decades.

        Upon further inspection, something else is going on. Some of these films are under an hour long! Let's filter our DataFrame for movies with a duration under 60 minutes and look at the genres. This might give us some insight into what is dragging down the average.
        ",
    );

    let short_movies = movies
        .clone()
        .lazy()
        .filter(col("duration").lt(lit(SHORT_MOVIE_MINUTES)))
        .collect()?;
    surface.table(TablePreview::from_frame(&short_movies, 20));

    surface.markdown(
        "
        ## Marking non-feature films

        Interesting! It looks as though many of the films that are under 60 minutes fall into genres such as \"Children\", \"Stand-Up\", and \"Documentaries\". This is a logical result, as these types of films are probably often shorter than 90 minute Hollywood blockbuster.

        We could eliminate these rows from our DataFrame and plot the values again. But another interesting way to explore the effect of these genres on our data would be to plot them, but mark them with a different color.
        ",
    );

    surface.figure(
        Figure::new(
            "Movie duration by year of release",
            FigureKind::Scatter {
                series: series_by_genre(&points),
            },
        )
        .with_labels("Release year", "Duration (min)"),
    );

    surface.markdown(
        "
        These allowed us to visualize the genres responsible for the decrease in the average length of the films.

        Well, as we suspected, non-typical genres such as children's movies (red) and documentaries (blue) are all clustered around the bottom half of the plot.
        ",
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_split_into_coloured_series() {
        let points = vec![
            (Some("Children".to_string()), [2019.0, 45.0]),
            (Some("Dramas".to_string()), [2018.0, 120.0]),
            (None, [2017.0, 90.0]),
            (Some("Stand-Up".to_string()), [2016.0, 58.0]),
        ];
        let series = series_by_genre(&points);

        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Children", "Documentaries", "Stand-Up", "Other"]);
        assert_eq!(series[0].points, vec![[2019.0, 45.0]]);
        assert!(series[1].points.is_empty());
        assert_eq!(series[2].color, Some([0, 128, 0]));
        assert_eq!(series[3].points.len(), 2);
    }
}
