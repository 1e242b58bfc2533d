use wasm_bindgen_test::*;

// Import the wasm functions from this crate
use reviewlink_wasm::{extract_place_id, review_url};

#[wasm_bindgen_test]
fn builds_review_url() {
    assert_eq!(
        review_url("ChIJN1t_tDeuEmsRUsoyG83frY4"),
        "https://search.google.com/local/writereview?placeid=ChIJN1t_tDeuEmsRUsoyG83frY4"
    );
}

#[wasm_bindgen_test]
fn finds_place_id_in_shared_link() {
    let id = extract_place_id("https://maps.google.com/?cid=7&place_id=ChIJabc&hl=en");
    assert_eq!(id.as_deref(), Some("ChIJabc"));
    assert_eq!(extract_place_id("Joe's Pizza"), None);
}
