use c45tree::prelude::*;

use std::fs;


fn tested_c45() -> C45 {
    let dataset = DatasetReader::new()
        .file("tests/dataset/tennis.csv")
        .schema("tests/dataset/tennis-schema.json")
        .percentage_split(66.0)
        .seed(3)
        .read()
        .unwrap();
    let mut c45 = C45Builder::new(dataset)
        .unseen_category(UnseenCategory::MajorityBranch)
        .build()
        .unwrap();
    c45.run().unwrap();
    c45
}


#[test]
fn report_has_every_section() {
    let c45 = tested_c45();
    let out = Report::new(&c45).render();

    assert!(out.starts_with("# Results for 'tennis' Data Set"));
    assert!(out.contains("Number of Instances: 14"));
    assert!(out.contains("Percentage Train/Test Split: 66%"));
    assert!(out.contains("## Unpruned Decision Tree"));
    assert!(out.contains("## Pruned Decision Tree"));
    assert!(out.contains(&format!(
        "Correctly Classified {} out of 5 Instances", c45.num_correct()
    )));
    assert!(out.contains(
        "| instance number | Outlook | Temperature | Humidity | Windy | predicted | actual |"
    ));
}


#[test]
fn report_has_one_row_per_tested_instance() {
    let c45 = tested_c45();
    let out = Report::new(&c45).render();

    let rows = out.lines()
        .skip_while(|line| !line.starts_with("| instance number"))
        .skip(2)
        .collect::<Vec<_>>();
    assert_eq!(rows.len(), c45.results().len());

    for (row, result) in rows.iter().zip(c45.results()) {
        let expected = format!("| {} |", result.instance.number());
        assert!(row.starts_with(&expected), "{row}");
        assert!(row.ends_with(&format!(" {} | {} |", result.predicted, result.actual)));
    }
}


#[test]
fn report_is_written_to_directory() {
    let c45 = tested_c45();
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("results");

    let path = Report::new(&c45)
        .title("1-trials-best")
        .write(&out_dir)
        .unwrap();

    assert_eq!(path, out_dir.join("out-1-trials-best.md"));
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, Report::new(&c45).render());

    let dot = fs::read_to_string(out_dir.join("1-trials-best-pruned.dot")).unwrap();
    assert!(dot.starts_with("graph DecisionTree {"));
    assert!(out_dir.join("1-trials-best-unpruned.dot").exists());
}


#[test]
fn trials_keep_the_best_tree() {
    let reader = DatasetReader::new()
        .file("tests/dataset/tennis.csv")
        .schema("tests/dataset/tennis-schema.json")
        .percentage_split(66.0);
    let config = C45Config {
        unseen_category: UnseenCategory::MajorityBranch,
        ..C45Config::default()
    };
    let summary = Trials::new(reader)
        .config(config)
        .n_trials(5)
        .seed(11)
        .run()
        .unwrap();

    assert_eq!(summary.accuracies.len(), 5);
    assert!(summary.best_iteration < 5);
    assert_eq!(summary.best_accuracy(), summary.accuracies[summary.best_iteration]);

    let best = summary.best_accuracy();
    assert!(summary.accuracies.iter().all(|&acc| acc <= best + 0.01));

    let average = summary.average_accuracy();
    assert!((0.0..=1.0).contains(&average));
}


#[test]
fn trials_reject_out_of_range_counts() {
    let reader = DatasetReader::new()
        .file("tests/dataset/tennis.csv")
        .schema("tests/dataset/tennis-schema.json");
    let res = Trials::new(reader).n_trials(0).run();
    assert!(matches!(res, Err(C45Error::InvalidConfig(_))));

    let reader = DatasetReader::new()
        .file("tests/dataset/tennis.csv")
        .schema("tests/dataset/tennis-schema.json");
    let res = Trials::new(reader).n_trials(10_001).run();
    assert!(matches!(res, Err(C45Error::InvalidConfig(_))));
}
