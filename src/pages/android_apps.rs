//! Google Play Store apps and reviews.

use crate::data::{f64_values, string_values, DataLoader, DataProcessor};
use crate::stats::StatsCalculator;
use crate::surface::{DisplaySurface, Figure, FigureKind, NamedValues, PointSeries, TablePreview};
use anyhow::Context;
use polars::prelude::*;
use std::collections::HashMap;

const APPS_FILE: &str = "apps.csv";
const REVIEWS_FILE: &str = "user_reviews.csv";

const CHARS_TO_REMOVE: [char; 3] = ['+', '$', ','];
const COLS_TO_CLEAN: [&str; 3] = ["Installs", "Price", "Content Rating"];

/// Categories with at least this many rated and sized apps go into the
/// size vs rating plot.
const LARGE_CATEGORY_MIN_APPS: usize = 250;

const POPULAR_CATEGORIES: [&str; 8] = [
    "GAME",
    "FAMILY",
    "PHOTOGRAPHY",
    "MEDICAL",
    "TOOLS",
    "FINANCE",
    "LIFESTYLE",
    "BUSINESS",
];

const RATING_BINS: usize = 20;

/// One de-duplicated app after cleaning.
struct App {
    name: Option<String>,
    category: Option<String>,
    rating: Option<f64>,
    size: Option<f64>,
    installs: Option<f64>,
    kind: Option<String>,
    price: Option<f64>,
}

/// Load apps.csv, drop duplicate apps and strip install/price symbols.
fn load_apps(loader: &DataLoader) -> anyhow::Result<DataFrame> {
    let mut raw = loader
        .load_csv(APPS_FILE)
        .with_context(|| format!("loading {}", APPS_FILE))?;

    // The first column is a bare row index
    let first = raw
        .get_column_names()
        .first()
        .map(|name| name.to_string())
        .unwrap_or_default();
    if first.is_empty() || first == "Unnamed: 0" {
        raw = raw.drop(&first)?;
    }

    let names = string_values(&raw, "App")?;
    let mask = DataProcessor::first_occurrence_mask(&names);
    let mut apps = DataProcessor::filter_rows(&raw, &mask)?;
    tracing::debug!(
        before = raw.height(),
        after = apps.height(),
        "dropped duplicate apps"
    );

    for col in COLS_TO_CLEAN {
        let cleaned: Vec<Option<String>> = string_values(&apps, col)?
            .into_iter()
            .map(|v| v.map(|s| DataProcessor::strip_chars(&s, &CHARS_TO_REMOVE)))
            .collect();
        apps.with_column(Column::new(col.into(), cleaned))?;
    }

    Ok(apps)
}

/// Replace a cleaned string column by its numeric value.
fn to_float(apps: &mut DataFrame, col: &str) -> anyhow::Result<Vec<Option<f64>>> {
    let parsed: Vec<Option<f64>> = string_values(apps, col)?
        .into_iter()
        .map(|v| v.as_deref().and_then(DataProcessor::parse_number))
        .collect();
    apps.with_column(Column::new(col.into(), parsed.clone()))?;
    Ok(parsed)
}

fn typed_apps(apps: &DataFrame, installs: Vec<Option<f64>>, price: Vec<Option<f64>>) -> anyhow::Result<Vec<App>> {
    let names = string_values(apps, "App")?;
    let categories = string_values(apps, "Category")?;
    let ratings = f64_values(apps, "Rating")?;
    let sizes = f64_values(apps, "Size")?;
    let kinds = string_values(apps, "Type")?;

    Ok(names
        .into_iter()
        .zip(categories)
        .zip(ratings)
        .zip(sizes)
        .zip(installs)
        .zip(kinds)
        .zip(price)
        .map(
            |((((((name, category), rating), size), installs), kind), price)| App {
                name,
                category,
                rating,
                size,
                installs,
                kind,
                price,
            },
        )
        .collect())
}

fn is_type(app: &App, kind: &str) -> bool {
    app.kind.as_deref() == Some(kind)
}

/// Price strip rows for the given apps, one row per category.
fn price_by_category<'a, I>(apps: I, order: Option<&[&str]>) -> Vec<NamedValues>
where
    I: IntoIterator<Item = &'a App>,
{
    let pairs = apps.into_iter().filter_map(|a| match (&a.category, a.price) {
        (Some(c), Some(p)) => Some((c.clone(), p)),
        _ => None,
    });
    let mut groups = DataProcessor::group_values(pairs);
    if let Some(order) = order {
        groups.sort_by_key(|(name, _)| order.iter().position(|o| o == name));
    }
    groups
        .into_iter()
        .map(|(name, values)| NamedValues::new(name, values))
        .collect()
}

pub fn render(loader: &DataLoader, surface: &mut dyn DisplaySurface) -> anyhow::Result<()> {
    surface.markdown(
        "
        # Google Play Store apps and reviews
        Mobile apps are everywhere. They are easy to create and can be lucrative. Because of these two factors, more and more apps are being developed. In this app, we will do a comprehensive analysis of the Android app market by comparing over ten thousand apps in Google Play across different categories. We'll look for insights in the data to devise strategies to drive growth and retention.
        Let's take a look at the data, which consists of two files:
        - **apps.csv**: contains all the details of the applications on Google Play. There are 13 features that describe a given app
        - **user_reviews.csv**: contains 100 reviews for each app. The text in each review has been pre-processed and attributed with three new features: Sentiment (Positive, Negative or Neutral), Sentiment Polarity and Sentiment Subjectivity.
        ",
    );

    let mut apps_df = load_apps(loader)?;
    let reviews_df = loader
        .load_csv(REVIEWS_FILE)
        .with_context(|| format!("loading {}", REVIEWS_FILE))?;

    let total_apps = string_values(&apps_df, "App")?.iter().flatten().count();
    surface.markdown("### The total number of apps and head of dataset");
    surface.markdown(&format!("Total number of apps in the dataset = {}", total_apps));
    surface.table(TablePreview::from_frame(&apps_df, 10));

    let installs = to_float(&mut apps_df, "Installs")?;
    let price = to_float(&mut apps_df, "Price")?;
    let apps = typed_apps(&apps_df, installs, price)?;

    surface.markdown(
        "
        ## Exploring app categories
        With more than 1 billion active users in 190 countries around the world, Google Play continues to be an important distribution platform to build a global audience. For businesses to get their apps in front of users, it's important to make them more quickly and easily discoverable on Google Play. To improve the overall search experience, Google has introduced the concept of grouping apps into categories.

        This brings us to the following questions:

        - Which category has the highest share of (active) apps in the market?
        - Is any specific category dominating the market?
        - Which categories have the fewest number of apps?
        ",
    );

    let per_category =
        DataProcessor::count_by(apps.iter().filter_map(|a| a.category.as_deref()));
    tracing::info!(categories = per_category.len(), "number of categories");
    for (category, count) in DataProcessor::top_counts(&per_category, 5) {
        tracing::debug!(category, count, "largest category");
    }

    surface.figure(
        Figure::new(
            "Number of apps per category",
            FigureKind::Bars {
                categories: per_category.keys().map(|c| c.to_string()).collect(),
                series: vec![NamedValues::new(
                    "apps",
                    per_category.values().map(|&c| c as f64).collect(),
                )],
            },
        )
        .with_labels("Category", "N° of App"),
    );

    surface.markdown(
        "
        ## Distribution of app ratings
        After having witnessed the market share for each category of apps, let's see how all these apps perform on an average. App ratings (on a scale of 1 to 5) impact the discoverability, conversion of apps as well as the company's overall brand image. Ratings are a key performance indicator of an app.

        From our research, we found that the average volume of ratings across all app categories is 4.17. The histogram plot is skewed to the left indicating that the majority of the apps are highly rated with only a few exceptions in the low-rated apps.
        ",
    );

    let ratings: Vec<f64> = apps.iter().filter_map(|a| a.rating).collect();
    surface.markdown(&format!(
        "Average app rating = {}",
        StatsCalculator::mean(&ratings)
    ));
    surface.figure(
        Figure::new(
            "Distribution of app ratings",
            FigureKind::Histogram {
                values: ratings,
                bins: RATING_BINS,
            },
        )
        .with_labels("Rating", "N° of App per Rating"),
    );

    surface.markdown(
        "
        ## Size and price of an app
        Let's now examine app size and app price. For size, if the mobile app is too large, it may be difficult and/or expensive for users to download. Lengthy download times could turn users off before they even experience your mobile app. Plus, each user's device has a finite amount of disk space. For price, some users expect their apps to be free or inexpensive. These problems compound if the developing world is part of your target market; especially due to internet speeds, earning power and exchange rates.

        How can we effectively come up with strategies to size and price our app?

        - Does the size of an app affect its rating?
        - Do users really care about system-heavy apps or do they prefer light-weighted apps?
        - Does the price of an app affect its rating?
        - Do users always prefer free apps over paid apps?

        We find that the majority of top rated apps (rating over 4) range from 2 MB to 20 MB. We also find that the vast majority of apps price themselves under $10.
        ",
    );

    let sized_and_rated: Vec<&App> = apps
        .iter()
        .filter(|a| a.rating.is_some() && a.size.is_some())
        .collect();
    let sized_per_category =
        DataProcessor::count_by(sized_and_rated.iter().filter_map(|a| a.category.as_deref()));
    let large_category_points: Vec<[f64; 2]> = sized_and_rated
        .iter()
        .filter(|a| {
            a.category
                .as_deref()
                .and_then(|c| sized_per_category.get(c))
                .is_some_and(|&n| n >= LARGE_CATEGORY_MIN_APPS)
        })
        .filter_map(|a| Some([a.size?, a.rating?]))
        .collect();

    surface.figure(
        Figure::new(
            "Size vs. rating in large categories",
            FigureKind::Scatter {
                series: vec![PointSeries::new("apps", large_category_points)],
            },
        )
        .with_labels("Size", "Rating"),
    );

    let paid_points: Vec<[f64; 2]> = apps
        .iter()
        .filter(|a| is_type(a, "Paid"))
        .filter_map(|a| Some([a.price?, a.rating?]))
        .collect();
    surface.figure(
        Figure::new(
            "Price vs. rating of paid apps",
            FigureKind::Scatter {
                series: vec![PointSeries::new("paid apps", paid_points)],
            },
        )
        .with_labels("Price", "Rating"),
    );

    surface.markdown(
        "
        ## Relation between app category and app price
        So now comes the hard part. How are companies and developers supposed to make ends meet? What monetization strategies can companies use to maximize profit? The costs of apps are largely based on features, complexity, and platform.

        There are many factors to consider when selecting the right pricing strategy for your mobile app. It is important to consider the willingness of your customer to pay for your app. A wrong price could break the deal before the download even happens. Potential customers could be turned off by what they perceive to be a shocking cost, or they might delete an app they've downloaded after receiving too many ads or simply not getting their money's worth.

        Different categories demand different price ranges. Some apps that are simple and used daily, like the calculator app, should probably be kept free. However, it would make sense to charge for a highly-specialized medical app that diagnoses diabetic patients. Below, we see that **Medical and Family** apps are the most expensive. Some medical apps extend even up to \\$80! All game apps are reasonably priced below $20.
        ",
    );

    let popular = apps.iter().filter(|a| {
        a.category
            .as_deref()
            .is_some_and(|c| POPULAR_CATEGORIES.contains(&c))
    });
    surface.figure(
        Figure::new(
            "App pricing trend across categories",
            FigureKind::Strip {
                groups: price_by_category(popular, Some(&POPULAR_CATEGORIES[..])),
            },
        )
        .with_labels("Price", "Category"),
    );

    surface.markdown("### Apps whose Price is greater than 200");
    let above_200: Vec<bool> = apps
        .iter()
        .map(|a| a.price.is_some_and(|p| p > 200.0))
        .collect();
    let expensive = DataProcessor::filter_rows(&apps_df, &above_200)?.select(["Category", "App", "Price"])?;
    surface.table(TablePreview::from_frame(&expensive, expensive.height()));

    surface.markdown(
        "
        ## Filter out \"junk\" apps

        It looks like a bunch of the really expensive apps are \"junk\" apps. That is, apps that don't really have a purpose. Some app developer may create an app called **I Am Rich Premium** or **most expensive app (H)** just for a joke or to test their app development skills. Some developers even do this with malicious intent and try to make money by hoping people accidentally click purchase on their app in the store.

        Let's filter out these junk apps and re-do our visualization.
        ",
    );

    let under_100 = apps.iter().filter(|a| a.price.is_some_and(|p| p < 100.0));
    surface.figure(
        Figure::new(
            "App pricing trend across categories after filtering for junk apps",
            FigureKind::Strip {
                groups: price_by_category(under_100, None),
            },
        )
        .with_labels("Price", "Category"),
    );

    surface.markdown(
        "
        ## Popularity of paid apps vs free apps
        For apps in the Play Store today, there are five types of pricing strategies: free, freemium, paid, paymium, and subscription. Let's focus on free and paid apps only. Some characteristics of free apps are:

        - Free to download.
        - Main source of income often comes from advertisements.
        - Often created by companies that have other products and the app serves as an extension of those products.
        - Can serve as a tool for customer retention, communication, and customer service.

        Some characteristics of paid apps are:

        - Users are asked to pay once for the app to download and use it.
        - The user can't really get a feel for the app before buying it.

        Are paid apps installed as much as free apps? It turns out that paid apps have a relatively lower number of installs than free apps, though the difference is not as stark as I would have expected!
        ",
    );

    let installs_of = |kind: &str| -> Vec<f64> {
        apps.iter()
            .filter(|a| is_type(a, kind))
            .filter_map(|a| a.installs)
            .collect()
    };
    surface.figure(
        Figure::new(
            "Number of downloads of paid apps vs. free apps",
            FigureKind::Boxes {
                groups: vec![
                    NamedValues::new("Paid", installs_of("Paid")),
                    NamedValues::new("Free", installs_of("Free")),
                ],
            },
        )
        .with_labels("Type", "number of downloads")
        .with_log_values(),
    );

    surface.markdown(
        "
        ## Sentiment analysis of user reviews

        Mining user review data to determine how people feel about your product, brand, or service can be done using a technique called sentiment analysis. User reviews for apps can be analyzed to identify if the mood is positive, negative or neutral about that app. For example, positive words in an app review might include words such as 'amazing', 'friendly', 'good', 'great', and 'love'. Negative words might be words like 'malware', 'hate', 'problem', 'refund', and 'incompetent'.

        By plotting sentiment polarity scores of user reviews for paid and free apps, we observe that free apps receive a lot of harsh comments, as indicated by the outliers on the negative y-axis. Reviews for paid apps appear never to be extremely negative. This may indicate something about app quality, i.e., paid apps being of higher quality than free apps on average. The median polarity score for paid apps is a little higher than free apps, thereby syncing with our previous observation.

        In this work, we analyzed over ten thousand apps from the Google Play Store. We can use our findings to inform our decisions should we ever wish to create an app ourselves.
        ",
    );

    surface.figure(
        Figure::new(
            "Sentiment Polarity Distribution",
            FigureKind::Boxes {
                groups: polarity_by_type(&apps, &reviews_df)?,
            },
        )
        .with_labels("Type", "Sentiment_Polarity"),
    );

    Ok(())
}

/// Join reviews to apps by name and group review polarity by app type.
/// Reviews without a sentiment or review text are dropped.
fn polarity_by_type(apps: &[App], reviews: &DataFrame) -> anyhow::Result<Vec<NamedValues>> {
    let type_of: HashMap<&str, &str> = apps
        .iter()
        .filter_map(|a| Some((a.name.as_deref()?, a.kind.as_deref()?)))
        .collect();

    let names = string_values(reviews, "App")?;
    let texts = string_values(reviews, "Review")?;
    let sentiments = string_values(reviews, "Sentiment")?;
    let polarity = f64_values(reviews, "Sentiment_Polarity")?;

    let pairs = names
        .iter()
        .zip(&texts)
        .zip(&sentiments)
        .zip(&polarity)
        .filter_map(|(((name, text), sentiment), polarity)| {
            text.as_ref()?;
            sentiment.as_ref()?;
            let kind = type_of.get(name.as_deref()?)?;
            Some((kind.to_string(), (*polarity)?))
        });

    Ok(DataProcessor::group_values(pairs)
        .into_iter()
        .map(|(name, values)| NamedValues::new(name, values))
        .collect())
}
