//! End-to-end behaviour of the collection API

use std::sync::Once;

use ordo_collection::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

fn integers(items: impl IntoIterator<Item = i64>) -> Collection<i64> {
    Collection::typed(kinds::integer(), items).unwrap()
}

// ===== WALKTHROUGHS =====

#[test]
fn sort_orders_ascending() {
    let mut c = integers([5, 2, 1, 3, 4]);
    c.sort();
    assert_eq!(c.to_vec(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn skip_then_take() {
    let mut c = integers(1..=6);
    c.skip(1).take(3);
    assert_eq!(c.to_vec(), vec![2, 3, 4]);
}

#[test]
fn chunk_leaves_source_intact() {
    let c = integers(1..=6);
    let chunks: Vec<Vec<i64>> = c.chunk(4).unwrap().iter().map(Collection::to_vec).collect();
    assert_eq!(chunks, vec![vec![1, 2, 3, 4], vec![5, 6]]);
    assert_eq!(c.to_vec(), vec![1, 2, 3, 4, 5, 6]);
}

#[derive(Debug, Clone, PartialEq)]
struct Translation {
    word: String,
    v: String,
}

fn translation(word: &str, v: &str) -> Translation {
    Translation {
        word: word.to_string(),
        v: v.to_string(),
    }
}

#[test]
fn join_words_with_translations() {
    let words = Collection::typed(kinds::string(), vec!["one".to_string(), "two".to_string()]).unwrap();
    let french = vec![translation("one", "un"), translation("two", "deux")];

    let rows = words
        .join(&french, String::clone, |t| t.word.clone(), |_, t| t.clone())
        .unwrap();

    assert_eq!(
        rows.to_vec(),
        vec![translation("one", "un"), translation("two", "deux")]
    );
    assert_eq!(rows[1].v, "deux");
    assert!(rows.kind().is_any());
}

// ===== STRICTNESS =====

#[rstest]
#[case::many(vec![1, 2, 3, 1], "COLLECTION_TOO_MANY_ITEMS")]
#[case::empty(vec![], "COLLECTION_EMPTY")]
fn single_failures(#[case] items: Vec<i64>, #[case] code: &str) {
    assert_eq!(integers(items).single().unwrap_err().code(), code);
}

#[test]
fn single_with_predicate() {
    assert_eq!(
        integers([1, 2, 3]).single_where(|n| *n == 4),
        Err(CollectionError::NoPredicateResult)
    );
    assert_eq!(integers([1]).single(), Ok(&1));
}

#[test]
fn aggregate_sums_zero_to_nine() {
    assert_eq!(integers(0..10).aggregate(0, |acc, n| acc + n), 45);
}

#[test]
fn sum_and_average_differ_on_empty() {
    let empty = Collection::empty(kinds::integer());
    assert_eq!(empty.sum(), 0.0);
    assert_eq!(empty.average(), Err(CollectionError::EmptyCollection));
}

#[rstest]
#[case::first(|c: &Collection<i64>| c.first().map(|_| ()), "COLLECTION_EMPTY")]
#[case::last(|c: &Collection<i64>| c.last().map(|_| ()), "COLLECTION_EMPTY")]
#[case::min(|c: &Collection<i64>| c.min().map(|_| ()), "COLLECTION_EMPTY")]
#[case::max_of(|c: &Collection<i64>| c.max_of(|n| *n).map(|_| ()), "COLLECTION_EMPTY")]
#[case::average(|c: &Collection<i64>| c.average().map(|_| ()), "COLLECTION_EMPTY")]
#[case::random(|c: &Collection<i64>| c.random(1, true).map(|_| ()), "COLLECTION_EMPTY")]
#[case::get(|c: &Collection<i64>| c.get(0).map(|_| ()), "COLLECTION_INDEX_OUT_OF_BOUNDS")]
#[case::chunk(|c: &Collection<i64>| c.chunk(0).map(|_| ()), "COLLECTION_INVALID_ARGUMENT")]
fn empty_collection_errors(
    #[case] op: fn(&Collection<i64>) -> CollectionResult<()>,
    #[case] code: &str,
) {
    let err = op(&Collection::empty(kinds::integer())).unwrap_err();
    assert_eq!(err.code(), code);
    assert!(err.is_client_error());
}

// ===== COVARIANCE =====

#[test]
fn concat_subkind_into_parent_only() {
    init_tracing();

    let mut integers = integers([-2, -1]);
    let positives = Collection::typed(kinds::positive_integer(), vec![1, 2]).unwrap();

    integers.concat(&positives).unwrap();
    assert_eq!(integers.to_vec(), vec![-2, -1, 1, 2]);

    let mut positives = positives;
    let err = positives.concat(&integers).unwrap_err();
    assert!(matches!(err, CollectionError::IncompatibleCollectionKind { .. }));
    assert_eq!(positives.to_vec(), vec![1, 2]);
}

#[derive(Debug, Clone, PartialEq)]
struct Shape {
    class: &'static str,
    sides: u32,
}

impl Classified for Shape {
    fn class_name(&self) -> &str {
        self.class
    }
}

fn shapes() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types
        .register_root("Shape")
        .unwrap()
        .register_subtype("Polygon", "Shape")
        .unwrap()
        .register_subtype("Square", "Polygon")
        .unwrap()
        .register_subtype("Circle", "Shape")
        .unwrap();
    types
}

#[test]
fn class_hierarchy_covariance() {
    let types = shapes();
    let square = Shape { class: "Square", sides: 4 };
    let triangle = Shape { class: "Polygon", sides: 3 };
    let circle = Shape { class: "Circle", sides: 0 };

    let mut polygons =
        Collection::typed(kinds::class_of(&types, "Polygon").unwrap(), vec![triangle.clone()]).unwrap();
    let squares = Collection::typed(kinds::class_of(&types, "Square").unwrap(), vec![square.clone()]).unwrap();
    let mut all = Collection::typed(kinds::class_of(&types, "Shape").unwrap(), vec![circle.clone()]).unwrap();

    polygons.concat(&squares).unwrap();
    assert_eq!(polygons.to_vec(), vec![triangle, square.clone()]);

    all.concat(&polygons).unwrap();
    assert_eq!(all.sum_of(|s| s.sides), 7.0);

    let mut narrow = squares;
    assert!(matches!(
        narrow.concat(&polygons),
        Err(CollectionError::IncompatibleCollectionKind { .. })
    ));
    assert!(matches!(
        polygons.push(circle),
        Err(CollectionError::InvalidItem { index: Some(2), .. })
    ));
}

#[test]
fn unknown_class_fails_before_items_are_checked() {
    let err = kinds::class_of::<Shape>(&shapes(), "Sqaure").unwrap_err();
    assert_eq!(err.code(), "COLLECTION_UNKNOWN_TARGET");
}

// ===== CONVERSION =====

#[test]
fn convert_by_name() {
    init_tracing();

    let mut registry = KindRegistry::new(shapes());
    registry.register(kinds::integer()).register(kinds::positive_integer());

    let mixed = Collection::from_vec(vec![3_i64, 1, 2]);
    let converted = mixed.to_collection_named(&registry, "positive_integer").unwrap();
    assert_eq!(converted.kind(), &kinds::positive_integer());

    assert_eq!(
        mixed.to_collection_named(&registry, "Shape").unwrap_err().code(),
        "COLLECTION_INCOMPATIBLE_TARGET"
    );
    assert_eq!(
        mixed.to_collection_named(&registry, "nope").unwrap_err().code(),
        "COLLECTION_UNKNOWN_TARGET"
    );

    let negative = Collection::from_vec(vec![1_i64, -1]);
    assert!(matches!(
        negative.to_collection_named(&registry, "positive_integer"),
        Err(CollectionError::InvalidItem { index: Some(1), .. })
    ));
}

// ===== STRUCTURAL =====

#[test]
fn index_writes_are_rejected() {
    let mut c = integers([1, 2, 3]);
    assert!(matches!(
        c.set_at(0, 10),
        Err(CollectionError::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        c.delete_at(1),
        Err(CollectionError::UnsupportedOperation { .. })
    ));
    assert_eq!(c[0], 1);
    assert_eq!(c.count(), 3);
}

#[test]
fn iteration_restarts_each_time() {
    let c = integers([1, 2, 3]);
    let mut seen = Vec::new();
    for _ in 0..2 {
        for n in &c {
            seen.push(*n);
        }
    }
    assert_eq!(seen, vec![1, 2, 3, 1, 2, 3]);
}

#[test]
fn mutable_and_immutable_policies_agree() {
    let items = vec![4, 4, 1, 3, 2];

    let mut mutable = integers(items.clone());
    mutable.distinct().sort().take_last(2);

    let frozen = ImmutableCollection::typed(kinds::integer(), items).unwrap();
    let derived = frozen.distinct().sort().take_last(2);

    assert_eq!(mutable.to_vec(), derived.to_vec());
    assert_eq!(frozen.len(), 5);
}
