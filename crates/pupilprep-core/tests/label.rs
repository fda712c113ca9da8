use polars::prelude::*;

use pupilprep_core::label::label_subject;
use pupilprep_core::types::SubjectId;

#[test]
fn label_appends_constant_id_column() {
    let df = df!("a" => &[1.0f64, 2.0, 3.0]).unwrap();
    let subject = SubjectId::new("017").unwrap();

    let labeled = label_subject(&df, &subject).expect("label failed");

    assert_eq!(labeled.height(), 3);
    assert_eq!(labeled.width(), 2);

    let names: Vec<&str> = labeled
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "id"]);

    let ids = labeled.column("id").unwrap().str().unwrap();
    for row in 0..3 {
        assert_eq!(ids.get(row), Some("017"));
    }
}
