//! Scala repository pull request history.

use crate::data::{i64_values, string_values, DataLoader, DataProcessor};
use crate::surface::{DisplaySurface, Figure, FigureKind, NamedValues, TablePreview};
use anyhow::Context;
use chrono::NaiveDateTime;
use std::collections::HashMap;

const PULLS_FILES: [&str; 2] = ["pulls_2011-2013.csv", "pulls_2014-2018.csv"];
const PULL_FILES_FILE: &str = "pull_files.csv";

const FILE_OF_INTEREST: &str = "src/compiler/scala/reflect/reify/phases/Calculate.scala";
/// Alphabetical, so series and legend order follow the author names.
const AUTHORS: [&str; 2] = ["soc", "xeno-by"];

const RECENT_PULLS: usize = 10;
const TOP_AUTHORS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
struct Pull {
    pid: i64,
    user: String,
    date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
struct PullFile {
    pid: i64,
    file: String,
}

fn load_pulls(loader: &DataLoader) -> anyhow::Result<Vec<Pull>> {
    let mut pulls = Vec::new();
    for name in PULLS_FILES {
        let df = loader
            .load_csv(name)
            .with_context(|| format!("loading {}", name))?;

        let pids = i64_values(&df, "pid")?;
        let users = string_values(&df, "user")?;
        let dates = string_values(&df, "date")?;

        for ((pid, user), date) in pids.into_iter().zip(users).zip(dates) {
            let (Some(pid), Some(user), Some(date)) = (pid, user, date) else {
                continue;
            };
            match DataProcessor::parse_timestamp(&date) {
                Some(date) => pulls.push(Pull { pid, user, date }),
                None => tracing::warn!(pid, date = %date, "skipping pull request with unparseable date"),
            }
        }
    }
    Ok(pulls)
}

fn load_pull_files(loader: &DataLoader) -> anyhow::Result<Vec<PullFile>> {
    let df = loader
        .load_csv(PULL_FILES_FILE)
        .with_context(|| format!("loading {}", PULL_FILES_FILE))?;

    let pids = i64_values(&df, "pid")?;
    let files = string_values(&df, "file")?;
    Ok(pids
        .into_iter()
        .zip(files)
        .filter_map(|(pid, file)| Some(PullFile { pid: pid?, file: file? }))
        .collect())
}

/// Inner join of pull files with pulls on pid, in pull-file order.
fn join_files<'a>(pulls: &'a [Pull], files: &'a [PullFile]) -> Vec<(&'a Pull, &'a PullFile)> {
    let mut by_pid: HashMap<i64, Vec<&Pull>> = HashMap::new();
    for p in pulls {
        by_pid.entry(p.pid).or_default().push(p);
    }
    files
        .iter()
        .flat_map(|f| {
            by_pid
                .get(&f.pid)
                .into_iter()
                .flatten()
                .map(move |p| (*p, f))
        })
        .collect()
}

/// The `n` most recent pulls, newest first.
fn most_recent<'a>(pulls: impl IntoIterator<Item = &'a Pull>, n: usize) -> Vec<&'a Pull> {
    let mut sorted: Vec<&Pull> = pulls.into_iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

fn format_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn pull_table(rows: &[(&Pull, &PullFile)]) -> TablePreview {
    TablePreview::new(
        vec!["pid".into(), "user".into(), "date".into(), "file".into()],
        rows.iter()
            .map(|(p, f)| {
                vec![
                    p.pid.to_string(),
                    p.user.clone(),
                    format_date(&p.date),
                    f.file.clone(),
                ]
            })
            .collect(),
    )
}

/// Pull request counts per year for each of `AUTHORS`.
fn yearly_by_author<'a>(pulls: impl IntoIterator<Item = &'a Pull>) -> Figure {
    use chrono::Datelike;

    let records: Vec<(i32, &str)> = pulls
        .into_iter()
        .filter(|p| AUTHORS.contains(&p.user.as_str()))
        .map(|p| (p.date.year(), p.user.as_str()))
        .collect();
    let (years, series) = DataProcessor::pivot_counts(&records, &AUTHORS);

    Figure::new(
        "Number of contributions per year",
        FigureKind::Bars {
            categories: years.iter().map(|y| y.to_string()).collect(),
            series: AUTHORS
                .iter()
                .zip(series)
                .map(|(author, counts)| NamedValues::new(*author, counts))
                .collect(),
        },
    )
    .with_labels("Year", "N° of pull requests")
}

pub fn render(loader: &DataLoader, surface: &mut dyn DisplaySurface) -> anyhow::Result<()> {
    use chrono::Datelike;

    surface.markdown(
        "
        # Scala's real-world project repository data

        With almost 30k commits and a history spanning over ten years, Scala is a mature programming language. It is a general-purpose programming language that has recently become another prominent language for data scientists.

        Scala is also an open source project. Open source projects have the advantage that their entire development histories -- who made changes, what was changed, code reviews, etc. -- are publicly available.

        We're going to read in, clean up, and visualize the real world project repository of Scala that spans data from a version control system (Git) as well as a project hosting site (GitHub). We will find out who has had the most influence on its development and who are the experts.

        The dataset we will use, which has been previously mined and extracted from GitHub, is comprised of three files:

        - **pulls_2011-2013.csv**: contains the basic information about the pull requests, and spans from the end of 2011 up to (but not including) 2014.
        - **pulls_2014-2018.csv** contains identical information, and spans from 2014 up to 2018.
        - **pull_files.csv** contains the files that were modified by each pull request.
        ",
    );

    let pulls = load_pulls(loader)?;
    let pull_files = load_pull_files(loader)?;
    let data = join_files(&pulls, &pull_files);
    tracing::debug!(pulls = pulls.len(), files = pull_files.len(), joined = data.len(), "pull data loaded");

    surface.markdown(
        "
        ##  Is the project still actively maintained?

        The activity in an open source project is not very consistent. Some projects might be active for many years after the initial release, while others can slowly taper out into oblivion. Before committing to contributing to a project, it is important to understand the state of the project. Is development going steadily, or is there a drop? Has the project been abandoned altogether?

        The data used in this project was collected in January of 2018. We are interested in the evolution of the number of contributions up to that date.

        For Scala, we will do this by plotting a chart of the project's activity. We will calculate the number of pull requests submitted each year during the project's lifetime. We will then plot these numbers to see the trend of contributions.
        ",
    );

    let per_year = DataProcessor::count_by(data.iter().map(|(p, _)| p.date.year()));
    surface.figure(
        Figure::new(
            "Number of contributions per year",
            FigureKind::Bars {
                categories: per_year.keys().map(|y| y.to_string()).collect(),
                series: vec![NamedValues::new(
                    "contributions",
                    per_year.values().map(|&c| c as f64).collect(),
                )],
            },
        )
        .with_labels("Year", "N° of contibutions"),
    );

    surface.markdown(
        "
        ## Is there camaraderie in the project?

        The organizational structure varies from one project to another, and it can influence your success as a contributor. A project that has a very small community might not be the best one to start working on. The small community might indicate a high barrier of entry. This can be caused by several factors, including a community that is reluctant to accept pull requests from \"outsiders,\" that the code base is hard to work with, etc. However, a large community can serve as an indicator that the project is regularly accepting pull requests from new contributors. Such a project would be a good place to start.

        In order to evaluate the dynamics of the community, we will plot a bar chart of the number of pull requests submitted by each user. The plot shows that there are few people that only contribute a small number of pull requests can be used as in indicator that the project is not welcoming of new contributors.
        ",
    );

    let per_user = DataProcessor::count_by(data.iter().map(|(p, _)| p.user.as_str()));
    surface.figure(
        Figure::new(
            "Contributions per user",
            FigureKind::Bars {
                categories: per_user.keys().map(|u| u.to_string()).collect(),
                series: vec![NamedValues::new(
                    "contributions",
                    per_user.values().map(|&c| c as f64).collect(),
                )],
            },
        )
        .with_labels("Users", "N° of contributions"),
    );

    surface.markdown(
        "
        ## What files were changed in the last ten pull requests?

        Choosing the right place to make a contribution is as important as choosing the project to contribute to. Some parts of the code might be stable, some might be dead. Contributing there might not have the most impact. Therefore it is important to understand the parts of the system that have been recently changed. This allows us to pinpoint the \"hot\" areas of the code where most of the activity is happening. Focusing on those parts might not the most effective use of our times.
        ",
    );

    let last_10 = most_recent(&pulls, RECENT_PULLS);
    let last_10_files: Vec<(&Pull, &PullFile)> = data
        .iter()
        .filter(|(p, _)| last_10.iter().any(|l| std::ptr::eq(*l, *p)))
        .copied()
        .collect();
    surface.table(pull_table(&last_10_files));

    surface.markdown(
        "
        ## Who made the most pull requests to a given file?

        When contributing to a project, we might need some guidance. We might find ourselves needing some information regarding the codebase. It is important direct any questions to the right person. Contributors to open source projects generally have other day jobs, so their time is limited. It is important to address our questions to the right people. One way to identify the right target for our inquiries is by using their contribution history.

        We identified *src/compiler/scala/reflect/reify/phases/Calculate.scala* as being recently changed. We are interested in the top 3 developers who changed that file. Those developers are the ones most likely to have the best understanding of the code.
        ",
    );

    let file_data: Vec<(&Pull, &PullFile)> = data
        .iter()
        .filter(|(_, f)| f.file == FILE_OF_INTEREST)
        .copied()
        .collect();
    let author_counts = DataProcessor::count_by(file_data.iter().map(|(p, _)| p.user.as_str()));
    surface.table(TablePreview::new(
        vec!["user".into(), "file".into()],
        DataProcessor::top_counts(&author_counts, TOP_AUTHORS)
            .into_iter()
            .map(|(user, count)| vec![user.to_string(), count.to_string()])
            .collect(),
    ));

    surface.markdown(
        "
        ## Who made the last ten pull requests on a given file?

        Open source projects suffer from fluctuating membership. This makes the problem of finding the right person more challenging: the person has to be knowledgeable and still be involved in the project. A person that contributed a lot in the past might no longer be available (or willing) to help. To get a better understanding, we need to investigate the more recent history of that particular part of the system.

        We will look at the history of *src/compiler/scala/reflect/reify/phases/Calculate.scala*.
        ",
    );

    let mut recent_on_file = file_data.clone();
    recent_on_file.sort_by(|a, b| b.0.date.cmp(&a.0.date));
    recent_on_file.truncate(RECENT_PULLS);
    surface.table(pull_table(&recent_on_file));

    surface.markdown(
        "
        ## The pull requests of two special developers

        Now that we have identified two potential contacts in the projects, we need to find the person who was most involved in the project in recent times. That person is most likely to answer our questions. For each calendar year, we are interested in understanding the number of pull requests the authors submitted. This will give us a high-level image of their contribution trend to the project.
        ",
    );

    surface.figure(yearly_by_author(&pulls));

    surface.markdown(
        "
        ## Visualizing the contributions of each developer

        As mentioned before, it is important to make a distinction between the global expertise and contribution levels and the contribution levels at a more granular level (file, submodule, etc.) In our case, we want to see which of our two developers of interest have the most experience with the code in a given file (*src/compiler/scala/reflect/reify/phases/Calculate.scala*). We will measure experience by the number of pull requests submitted that affect that file and how recent those pull requests were submitted.
        ",
    );

    surface.figure(yearly_by_author(file_data.iter().map(|(p, _)| *p)));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pull(pid: i64, user: &str, date: &str) -> Pull {
        Pull {
            pid,
            user: user.to_string(),
            date: DataProcessor::parse_timestamp(date).unwrap(),
        }
    }

    fn file(pid: i64, name: &str) -> PullFile {
        PullFile {
            pid,
            file: name.to_string(),
        }
    }

    #[test]
    fn join_keeps_only_matching_pids() {
        let pulls = vec![pull(1, "soc", "2014-01-01T00:00:00Z"), pull(2, "xeno-by", "2015-01-01T00:00:00Z")];
        let files = vec![file(2, "a.scala"), file(3, "orphan.scala"), file(1, "b.scala"), file(2, "c.scala")];

        let joined = join_files(&pulls, &files);
        let pairs: Vec<(i64, &str)> = joined.iter().map(|(p, f)| (p.pid, f.file.as_str())).collect();
        assert_eq!(pairs, vec![(2, "a.scala"), (1, "b.scala"), (2, "c.scala")]);
    }

    #[test]
    fn most_recent_is_newest_first() {
        let pulls = vec![
            pull(1, "a", "2012-05-01T00:00:00Z"),
            pull(2, "b", "2017-05-01T00:00:00Z"),
            pull(3, "c", "2015-05-01T00:00:00Z"),
        ];
        let recent: Vec<i64> = most_recent(&pulls, 2).iter().map(|p| p.pid).collect();
        assert_eq!(recent, vec![2, 3]);
    }

    #[test]
    fn yearly_counts_only_track_the_two_authors() {
        let pulls = vec![
            pull(1, "soc", "2013-01-01T00:00:00Z"),
            pull(2, "soc", "2013-06-01T00:00:00Z"),
            pull(3, "xeno-by", "2014-01-01T00:00:00Z"),
            pull(4, "someone", "2016-01-01T00:00:00Z"),
        ];
        let fig = yearly_by_author(&pulls);
        let FigureKind::Bars { categories, series } = fig.kind else {
            panic!("expected bars");
        };
        assert_eq!(categories, vec!["2013", "2014"]);
        assert_eq!(series[0].name, "soc");
        assert_eq!(series[0].values, vec![2.0, 0.0]);
        assert_eq!(series[1].name, "xeno-by");
        assert_eq!(series[1].values, vec![0.0, 1.0]);
    }
}
