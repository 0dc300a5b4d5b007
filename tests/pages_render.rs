use portfolio_dashboard::data::LoaderError;
use portfolio_dashboard::export::{export_report, REPORT_FILE};
use portfolio_dashboard::pages::{
    build_registry, ANDROID_APP_MARKET, NETFLIX_MOVIES, PROFILE, SCALA_HISTORY,
};
use portfolio_dashboard::registry::FixedSelection;
use portfolio_dashboard::surface::{Block, FigureKind, ReportCanvas};
use std::path::Path;
use tempfile::TempDir;

fn write_csv(path: &Path, header: &str, rows: &[&str]) {
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(path, content).unwrap();
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let p = dir.path();

    write_csv(
        &p.join("apps.csv"),
        "App,Category,Rating,Reviews,Size,Installs,Type,Price,Content Rating,Genres",
        &[
            "Photo Editor,ART_AND_DESIGN,4.1,159,19.0,\"10,000+\",Free,0,Everyone,Art & Design",
            "Photo Editor,ART_AND_DESIGN,4.1,159,19.0,\"10,000+\",Free,0,Everyone,Art & Design",
            "Coloring book,ART_AND_DESIGN,3.9,967,14.0,\"500,000+\",Free,0,Everyone,Art & Design",
            "Pocket Doctor,MEDICAL,4.6,12,3.5,\"1,000+\",Paid,$79.99,Everyone,Medical",
            "I Am Rich,LIFESTYLE,3.8,3547,1.8,\"100,000+\",Paid,$399.99,Everyone,Lifestyle",
            "Solitaire,GAME,4.4,1200,25.0,\"1,000,000+\",Free,0,Everyone,Card",
            "Chess Pro,GAME,4.5,800,8.0,\"50,000+\",Paid,$2.99,Everyone,Board",
        ],
    );
    write_csv(
        &p.join("user_reviews.csv"),
        "App,Review,Sentiment,Sentiment_Polarity,Sentiment_Subjectivity",
        &[
            "Photo Editor,I like it,Positive,0.5,0.6",
            "Solitaire,Too many ads,Negative,-0.4,0.7",
            "Chess Pro,Great,Positive,0.8,0.75",
            "Chess Pro,,,,",
        ],
    );

    write_csv(
        &p.join("netflix_data.csv"),
        "show_id,type,title,director,cast,country,date_added,release_year,duration,description,genre",
        &[
            "s1,TV Show,3%,,Joao,Brazil,\"August 14, 2020\",2020,4,Future,International TV",
            "s2,Movie,7:19,Jorge,Demian,Mexico,\"December 23, 2016\",2016,93,Earthquake,Dramas",
            "s3,Movie,Kid Show,Ann,Bob,United States,\"May 1, 2019\",2019,45,Songs,Children",
            "s4,Movie,Laughs,Cat,Dan,United States,\"June 2, 2018\",2018,58,Jokes,Stand-Up",
            "s5,Movie,Deep Sea,Eve,Fay,United Kingdom,\"July 3, 2017\",2017,88,Ocean,Documentaries",
        ],
    );

    write_csv(
        &p.join("pulls_2011-2013.csv"),
        "pid,user,date",
        &[
            "11166973,xeno-by,2013-12-31T23:10:55Z",
            "11161892,soc,2013-12-31T16:55:47Z",
        ],
    );
    write_csv(
        &p.join("pulls_2014-2018.csv"),
        "pid,user,date",
        &[
            "163314316,hrhino,2018-01-16T23:29:16Z",
            "163061502,xeno-by,2018-01-15T23:44:52Z",
            "120000000,soc,2016-05-01T10:00:00Z",
        ],
    );
    write_csv(
        &p.join("pull_files.csv"),
        "pid,file",
        &[
            "163314316,test/files/pos/t5638/Among.java",
            "163061502,src/compiler/scala/reflect/reify/phases/Calculate.scala",
            "11166973,src/compiler/scala/reflect/reify/phases/Calculate.scala",
            "11161892,src/library/scala/Option.scala",
            "120000000,src/compiler/scala/reflect/reify/phases/Calculate.scala",
        ],
    );

    dir
}

fn render(dir: &Path, title: &str) -> (ReportCanvas, anyhow::Result<()>) {
    let registry = build_registry(dir);
    let mut canvas = ReportCanvas::new();
    let result = registry.run(&mut FixedSelection(title.to_string()), &mut canvas);
    (canvas, result)
}

fn first_markdown(canvas: &ReportCanvas) -> &str {
    match canvas.blocks.first() {
        Some(Block::Markdown(md)) => &md.text,
        other => panic!("expected markdown first, got {:?}", other),
    }
}

#[test]
fn profile_needs_no_datasets() {
    let dir = TempDir::new().unwrap();
    let (canvas, result) = render(dir.path(), PROFILE);
    result.unwrap();
    assert!(first_markdown(&canvas).starts_with("# Laurence Marcano"));
    assert_eq!(canvas.figures().count(), 0);
}

#[test]
fn android_page_renders_all_sections() {
    let dir = fixture_dir();
    let (canvas, result) = render(dir.path(), ANDROID_APP_MARKET);
    result.unwrap();

    assert!(first_markdown(&canvas).starts_with("# Google Play Store apps and reviews"));
    assert_eq!(canvas.figures().count(), 8);
    assert_eq!(canvas.tables().count(), 2);

    // Duplicate "Photo Editor" row is dropped
    let total = canvas.blocks.iter().find_map(|b| match b {
        Block::Markdown(md) if md.text.starts_with("Total number of apps") => Some(md.text.clone()),
        _ => None,
    });
    assert_eq!(total.as_deref(), Some("Total number of apps in the dataset = 6"));

    let expensive = canvas.tables().nth(1).unwrap();
    assert_eq!(expensive.columns, vec!["Category", "App", "Price"]);
    assert_eq!(expensive.rows.len(), 1);
    assert_eq!(expensive.rows[0][1], "I Am Rich");

    let installs = canvas
        .figures()
        .find(|f| f.title.starts_with("Number of downloads"))
        .unwrap();
    assert!(installs.log_values);
}

#[test]
fn netflix_page_filters_movies() {
    let dir = fixture_dir();
    let (canvas, result) = render(dir.path(), NETFLIX_MOVIES);
    result.unwrap();

    assert_eq!(canvas.figures().count(), 3);
    let tables: Vec<_> = canvas.tables().collect();
    assert_eq!(tables.len(), 3);
    assert_eq!(tables[0].total_rows, 5);
    assert_eq!(
        tables[1].columns,
        vec!["title", "country", "genre", "release_year", "duration"]
    );
    assert_eq!(tables[1].total_rows, 4);
    // Under an hour: the children's movie and the stand-up special
    assert_eq!(tables[2].total_rows, 2);

    let coloured = canvas.figures().last().unwrap();
    let FigureKind::Scatter { series } = &coloured.kind else {
        panic!("expected scatter");
    };
    assert_eq!(series.len(), 4);
    assert_eq!(series[3].name, "Other");
    assert_eq!(series[3].points, vec![[2016.0, 93.0]]);
}

#[test]
fn scala_page_finds_file_experts() {
    let dir = fixture_dir();
    let (canvas, result) = render(dir.path(), SCALA_HISTORY);
    result.unwrap();

    assert_eq!(canvas.figures().count(), 4);
    let tables: Vec<_> = canvas.tables().collect();
    assert_eq!(tables.len(), 3);

    // All five pulls are within the last ten
    assert_eq!(tables[0].rows.len(), 5);

    assert_eq!(tables[1].columns, vec!["user", "file"]);
    assert_eq!(
        tables[1].rows,
        vec![
            vec!["xeno-by".to_string(), "2".to_string()],
            vec!["soc".to_string(), "1".to_string()],
        ]
    );

    // Newest first
    assert_eq!(tables[2].rows.len(), 3);
    assert_eq!(tables[2].rows[0][0], "163061502");

    let per_year = canvas.figures().next().unwrap();
    let FigureKind::Bars { categories, .. } = &per_year.kind else {
        panic!("expected bars");
    };
    assert_eq!(categories, &vec!["2013", "2016", "2018"]);
}

#[test]
fn missing_dataset_keeps_partial_output() {
    let dir = TempDir::new().unwrap();
    let (canvas, result) = render(dir.path(), ANDROID_APP_MARKET);

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoaderError>(),
        Some(LoaderError::MissingFile { .. })
    ));
    assert_eq!(canvas.len(), 1);
}

#[test]
fn export_writes_markdown_report() {
    let dir = TempDir::new().unwrap();
    let (canvas, result) = render(dir.path(), PROFILE);
    result.unwrap();

    let out = dir.path().join("export");
    let written = export_report(&canvas, &out, 640, 400).unwrap();
    assert_eq!(written, vec![out.join(REPORT_FILE)]);

    let report = std::fs::read_to_string(out.join(REPORT_FILE)).unwrap();
    assert!(report.starts_with("# Laurence Marcano"));
}

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

fn assert_exported_figures(title: &str, expected_figures: usize) {
    let dir = fixture_dir();
    let (canvas, result) = render(dir.path(), title);
    result.unwrap();
    assert_eq!(canvas.figures().count(), expected_figures);

    let out = dir.path().join("export");
    let written = export_report(&canvas, &out, 640, 400).unwrap();
    assert_eq!(written.len(), expected_figures + 1);
    assert_eq!(written.last(), Some(&out.join(REPORT_FILE)));

    let report = std::fs::read_to_string(out.join(REPORT_FILE)).unwrap();
    for n in 1..=expected_figures {
        let name = format!("figure_{:02}.png", n);
        let bytes = std::fs::read(out.join(&name)).unwrap();
        assert!(bytes.starts_with(&PNG_MAGIC), "{} is not a PNG", name);
        assert!(report.contains(&format!("]({})", name)), "report.md does not link {}", name);
    }
}

#[test]
fn export_renders_android_figures() {
    assert_exported_figures(ANDROID_APP_MARKET, 8);
}

#[test]
fn export_renders_scala_figures() {
    assert_exported_figures(SCALA_HISTORY, 4);
}
