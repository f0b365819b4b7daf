use super::*;
use pretty_assertions::assert_eq;

#[test]
fn undefined_identifier_page() {
    let doc = ErrorDocs::get(ErrorCode::E2001).unwrap();
    assert!(doc.contains("Undefined Identifier"));
}

#[test]
fn every_code_is_documented_in_order() {
    for code in ErrorCode::ALL {
        assert!(ErrorDocs::has_docs(*code), "{code} has no docs");
    }
    assert_eq!(ErrorDocs::all_codes().collect::<Vec<_>>(), ErrorCode::ALL);
}

#[test]
fn page_heading_names_its_code() {
    for code in ErrorDocs::all_codes() {
        let doc = ErrorDocs::get(code).unwrap();
        assert!(doc.starts_with(&format!("# {code}:")), "{code}");
    }
}
