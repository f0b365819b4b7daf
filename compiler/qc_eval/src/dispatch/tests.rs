use super::*;
use pretty_assertions::assert_eq;

#[test]
fn insert_and_retrieve() {
    let mut trie = KeywordTrie::new();
    assert_eq!(trie.insert("IF", 1), None);
    assert_eq!(trie.insert("IGNORE", 2), None);
    assert_eq!(trie.retrieve("IF"), Some(&1));
    assert_eq!(trie.retrieve("IGNORE"), Some(&2));
    assert_eq!(trie.len(), 2);
}

#[test]
fn prefix_is_not_a_key() {
    let mut trie = KeywordTrie::new();
    trie.insert("DECLARE", ());
    assert!(!trie.contains("DECL"));
    assert!(!trie.contains("DECLARED"));
    assert!(trie.contains("DECLARE"));
}

#[test]
fn insert_replaces_existing() {
    let mut trie = KeywordTrie::new();
    trie.insert("RET", 1);
    assert_eq!(trie.insert("RET", 2), Some(1));
    assert_eq!(trie.retrieve("RET"), Some(&2));
    assert_eq!(trie.len(), 1);
}

#[test]
fn keys_with_prefix_are_sorted() {
    let mut trie = KeywordTrie::new();
    for key in ["IGNORE", "IF", "JUMP", "I"] {
        trie.insert(key, ());
    }
    assert_eq!(trie.keys_with_prefix("I"), vec!["I", "IF", "IGNORE"]);
    assert_eq!(trie.keys_with_prefix("IG"), vec!["IGNORE"]);
    assert!(trie.keys_with_prefix("X").is_empty());
    assert_eq!(trie.keys_with_prefix("").len(), 4);
}

#[test]
fn remove_prunes_but_keeps_siblings() {
    let mut trie = KeywordTrie::new();
    trie.insert("IF", 1);
    trie.insert("IGNORE", 2);
    assert_eq!(trie.remove("IGNORE"), Some(2));
    assert_eq!(trie.remove("IGNORE"), None);
    assert_eq!(trie.remove("I"), None);
    assert_eq!(trie.retrieve("IF"), Some(&1));
    assert_eq!(trie.keys_with_prefix("IG"), Vec::<String>::new());
    assert_eq!(trie.len(), 1);
}

#[test]
fn standard_table_has_every_builtin() {
    let table = DispatchTable::standard();
    assert_eq!(
        table.keywords(),
        vec![
            "ASSIGN", "CALL", "DECLARE", "FUNC", "IF", "IGNORE", "JUMP", "RET", "STD::OUT", "WAIT",
        ]
    );
    assert!(!table.contains("ELSE"));
    assert!(!table.contains("END"));
    assert!(!table.contains("WHILE"));
}

#[test]
fn suggestions_for_typos() {
    let table = DispatchTable::standard();
    assert_eq!(table.suggestions("declare"), vec!["DECLARE"]);
    assert_eq!(table.suggestions("DECLAR"), vec!["DECLARE"]);
    assert_eq!(table.suggestions("IGNORED"), vec!["IGNORE"]);
    assert_eq!(table.suggestions("STD::IN"), vec!["STD::OUT"]);
    assert!(table.suggestions("XYZ").is_empty());
}
