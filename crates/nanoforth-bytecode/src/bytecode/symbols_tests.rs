use super::symbols::Symbols;

#[test]
fn lookup_by_name() {
    let symbols: Symbols = [("main", 0), ("double", 4)].into_iter().collect();
    assert_eq!(symbols.address_of("double"), Some(4));
    assert_eq!(symbols.address_of("triple"), None);
    assert_eq!(symbols.len(), 2);
}

#[test]
fn names_at_shared_address() {
    let symbols: Symbols = [("a", 3), ("b", 5), ("c", 3)].into_iter().collect();
    let names: Vec<_> = symbols.names_at(3).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert_eq!(symbols.names_at(9).count(), 0);
}

#[test]
fn iter_keeps_definition_order() {
    let symbols: Symbols = [("z", 1), ("a", 0)].into_iter().collect();
    let all: Vec<_> = symbols.iter().collect();
    assert_eq!(all, vec![("z", 1), ("a", 0)]);
}

#[test]
fn insert_rebinds() {
    let mut symbols = Symbols::new();
    assert_eq!(symbols.insert("w", 1), None);
    assert_eq!(symbols.insert("w", 2), Some(1));
    assert_eq!(symbols.address_of("w"), Some(2));
}
