//! End-to-end normalization through the public API

use clausify::json::{ClauseSetJson, ProblemJson};
use clausify::normalize::invariants::is_implication_free;
use clausify::{
    eliminate_implications, ClausifyError, Formula, FormulaBuilder, Interner, NormalizeConfig,
    Normalizer, PrenexOrder, RecordingSink, Stage, Term, WriterSink,
};
use std::io::Write;
use std::time::Duration;

fn clause_strings(result: &clausify::Normalized, interner: &Interner) -> Vec<String> {
    result
        .clauses
        .iter()
        .map(|c| c.display(interner).to_string())
        .collect()
}

#[test]
fn test_existential_gives_one_fresh_constant() {
    let mut interner = Interner::new();
    let mut b = FormulaBuilder::new(&mut interner);
    let x = b.var("x");
    let px = b.unary("P", x);

    let result = Normalizer::default()
        .normalize(vec![Formula::exists(x, px)], &mut interner)
        .unwrap();

    assert_eq!(clause_strings(&result, &interner), vec!["P(sk0)"]);
    let lit = &result.clauses[0].literals[0];
    assert!(lit.polarity);
    assert!(matches!(lit.args[0], Term::Constant(_)));
}

#[test]
fn test_biconditionals_are_eliminated() {
    // all x.((P(x) <-> A) & (P(y) <-> B))
    let mut interner = Interner::new();
    let mut b = FormulaBuilder::new(&mut interner);
    let x = b.var("x");
    let y = b.var("y");
    let px = b.unary("P", x);
    let py = b.unary("P", y);
    let a = b.prop("A");
    let bb = b.prop("B");
    let formula = Formula::forall(x, Formula::and(Formula::iff(px, a), Formula::iff(py, bb)));

    let eliminated = eliminate_implications(formula.clone());
    assert!(is_implication_free(&eliminated));
    let Formula::Quantified(_, _, body) = &eliminated else {
        panic!("Expected quantifier");
    };
    let Formula::And(left, right) = body.as_ref() else {
        panic!("Expected conjunction");
    };
    assert_eq!(
        left.display(&interner).to_string(),
        "((-P(x) | A) & (P(x) | -A))"
    );
    assert_eq!(
        right.display(&interner).to_string(),
        "((-P(y) | B) & (P(y) | -B))"
    );

    let result = Normalizer::default().normalize(vec![formula], &mut interner).unwrap();
    assert_eq!(
        clause_strings(&result, &interner),
        vec!["-P(x) | A", "P(x) | -A", "-P(y) | B", "P(y) | -B"]
    );
}

#[test]
fn test_premises_with_shared_variable_names() {
    // all x.(Read(x) -> -Stupid(x)), all x.(Student(x) -> Read(x))
    let mut interner = Interner::new();
    let mut b = FormulaBuilder::new(&mut interner);
    let x = b.var("x");
    let read = b.unary("Read", x);
    let stupid = b.unary("Stupid", x);
    let student = b.unary("Student", x);
    let formulas = vec![
        Formula::forall(x, Formula::implies(read.clone(), Formula::not(stupid))),
        Formula::forall(x, Formula::implies(student, read)),
    ];

    let result = Normalizer::default().normalize(formulas, &mut interner).unwrap();

    assert_eq!(
        clause_strings(&result, &interner),
        vec!["-Read(x) | -Stupid(x)", "-Student(z1) | Read(z1)"]
    );
}

#[test]
fn test_trace_sink_sees_each_stage_once() {
    let mut interner = Interner::new();
    let mut b = FormulaBuilder::new(&mut interner);
    let x = b.var("x");
    let dog = b.unary("Dog", x);
    let jack = b.constant("Jack");
    let owns = b.atom("Owns", vec![jack, Term::Variable(x)]);
    let formula = Formula::exists(x, Formula::and(dog, owns));

    let config = NormalizeConfig {
        trace: true,
        ..Default::default()
    };
    let mut sink = RecordingSink::new();
    let result = Normalizer::new(config)
        .normalize_with_sink(vec![formula], &mut interner, &mut sink)
        .unwrap();

    assert_eq!(sink.stages.len(), Stage::ALL.len());
    assert_eq!(
        sink.lines(Stage::Skolemization).unwrap(),
        &["(Dog(sk0) & Owns(Jack,sk0))".to_string()]
    );
    assert_eq!(
        sink.lines(Stage::ClauseExtraction).unwrap(),
        clause_strings(&result, &interner).as_slice()
    );
}

#[test]
fn test_writer_sink_headings() {
    let mut interner = Interner::new();
    let mut b = FormulaBuilder::new(&mut interner);
    let p = b.prop("P");
    let q = b.prop("Q");

    let config = NormalizeConfig {
        trace: true,
        ..Default::default()
    };
    let mut sink = WriterSink::new(Vec::new());
    Normalizer::new(config)
        .normalize_with_sink(vec![Formula::implies(p, q)], &mut interner, &mut sink)
        .unwrap();
    let text = String::from_utf8(sink.into_inner()).unwrap();

    assert!(text.starts_with("After eliminating implication:\n (-P | Q)\n\n"));
    assert!(text.ends_with("After converting to clause:\n -P | Q\n\n"));
}

#[test]
fn test_tracing_does_not_change_result() {
    let build = |interner: &mut Interner| {
        let mut b = FormulaBuilder::new(interner);
        let x = b.var("x");
        let y = b.var("y");
        let l = b.atom("L", vec![Term::Variable(x), Term::Variable(y)]);
        Formula::forall(x, Formula::exists(y, l))
    };

    let mut plain = Interner::new();
    let formula = build(&mut plain);
    let quiet = Normalizer::default().normalize(vec![formula], &mut plain).unwrap();

    let mut traced = Interner::new();
    let formula = build(&mut traced);
    let config = NormalizeConfig {
        trace: true,
        ..Default::default()
    };
    let loud = Normalizer::new(config)
        .normalize_with_sink(vec![formula], &mut traced, &mut RecordingSink::new())
        .unwrap();

    assert_eq!(clause_strings(&quiet, &plain), clause_strings(&loud, &traced));
}

#[test]
fn test_clause_limit_stops_distribution() {
    // (A & B) | (C & D) | (E & F) needs eight clauses
    let mut interner = Interner::new();
    let mut b = FormulaBuilder::new(&mut interner);
    let pairs: Vec<Formula> = ["A", "B", "C", "D", "E", "F"]
        .chunks(2)
        .map(|pair| {
            let l = b.prop(pair[0]);
            let r = b.prop(pair[1]);
            Formula::and(l, r)
        })
        .collect();
    let formula = pairs.into_iter().reduce(Formula::or).unwrap();

    let config = NormalizeConfig {
        max_clauses: 5,
        ..Default::default()
    };
    let err = Normalizer::new(config)
        .normalize(vec![formula.clone()], &mut interner)
        .unwrap_err();
    assert!(matches!(
        err,
        ClausifyError::ClauseLimitExceeded {
            stage: Stage::Distribution,
            limit: 5
        }
    ));

    let result = Normalizer::default().normalize(vec![formula], &mut interner).unwrap();
    assert_eq!(result.clauses.len(), 8);
}

#[test]
fn test_zero_timeout_is_reported() {
    let mut interner = Interner::new();
    let mut b = FormulaBuilder::new(&mut interner);
    let p = b.prop("P");

    let config = NormalizeConfig {
        timeout_ms: Some(0),
        ..Default::default()
    };
    let err = Normalizer::new(config).normalize(vec![p], &mut interner).unwrap_err();
    assert!(matches!(err, ClausifyError::Timeout { .. }));
}

#[test]
fn test_generous_timeout_passes() {
    let mut interner = Interner::new();
    let mut b = FormulaBuilder::new(&mut interner);
    let p = b.prop("P");

    let config = NormalizeConfig {
        timeout_ms: Some(Duration::from_secs(60).as_millis() as u64),
        check_invariants: true,
        ..Default::default()
    };
    assert!(Normalizer::new(config).normalize(vec![p], &mut interner).is_ok());
}

#[test]
fn test_problem_file_round_trip() {
    let json = r#"{
        "formulas": [
            {"type": "forall", "variable": "x", "body":
                {"type": "implies",
                 "left": {"type": "atom", "predicate": "Human", "args": [{"type": "variable", "name": "x"}]},
                 "right": {"type": "atom", "predicate": "Mortal", "args": [{"type": "variable", "name": "x"}]}}},
            {"type": "atom", "predicate": "Human", "args": [{"type": "constant", "name": "socrates"}]}
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let problem = ProblemJson::from_json_file(file.path()).unwrap();
    let mut interner = Interner::new();
    let formulas = problem.to_formulas(&mut interner);
    let result = Normalizer::default().normalize(formulas, &mut interner).unwrap();

    assert_eq!(
        clause_strings(&result, &interner),
        vec!["-Human(x) | Mortal(x)", "Human(socrates)"]
    );

    let output = serde_json::to_string(&ClauseSetJson::from_clauses(&result.clauses, &interner)).unwrap();
    let parsed: ClauseSetJson = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.clauses.len(), 2);
    assert!(!parsed.clauses[0].literals[0].polarity);
    assert_eq!(parsed.clauses[1].literals[0].atom.predicate, "Human");
}

#[test]
fn test_config_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"prenex_order": "preserve", "max_clauses": 10}"#)
        .unwrap();

    let config = NormalizeConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.prenex_order, PrenexOrder::Preserve);
    assert_eq!(config.max_clauses, 10);
    assert!(!config.trace);
}

#[test]
fn test_missing_problem_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProblemJson::from_json_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ClausifyError::IoError(_)));
}

#[test]
fn test_independent_interners_do_not_interfere() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let mut interner = Interner::new();
                let mut b = FormulaBuilder::new(&mut interner);
                let x = b.var("x");
                let px = b.unary("P", x);
                let result = Normalizer::default()
                    .normalize(vec![Formula::exists(x, px)], &mut interner)
                    .unwrap();
                clause_strings(&result, &interner)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["P(sk0)"]);
    }
}
