use llm_trace_cleaner::attributes::{strip_with_regex, strip_with_tree};
use llm_trace_cleaner::stats::ChangeRecorder;
use llm_trace_cleaner::Options;

const SAMPLE: &str = concat!(
    "<h2 data-pm-slice=\"1 1 []\" class=\"wp-block-heading\">Head</h2>",
    "<p data-start=\"0\" data-end=\"5\" data-is-last-node>last</p>",
    "<span data-message-id=\"m-1\" data-role=\"assistant\">turn</span>",
    "<div id=\"model-response-message-contentr_f0\" class=\"answer\">a</div>",
    "<p class=\"intro\" title=\"keep\">untouched attrs</p>",
);

fn catalog() -> Vec<String> {
    Options::default().attribute_catalog()
}

#[test]
fn both_strategies_remove_the_same_attributes() {
    let mut tree_rec = ChangeRecorder::new(false);
    let mut text_rec = ChangeRecorder::new(false);

    let tree = strip_with_tree(SAMPLE, &catalog(), &mut tree_rec).expect("tree strip");
    let text = strip_with_regex(SAMPLE, &catalog(), &mut text_rec);

    assert_eq!(tree_rec.stats(), text_rec.stats());
    for out in [&tree, &text] {
        assert!(!out.contains("data-pm-slice"));
        assert!(!out.contains("data-start"));
        assert!(!out.contains("data-is-last-node"));
        assert!(!out.contains("data-message-id"));
        assert!(!out.contains("model-response-message-contentr_"));
        assert!(out.contains("wp-block-heading"));
        assert!(out.contains(r#"title="keep""#));
    }
}

#[test]
fn tree_strategy_reports_element_locations_text_strategy_generic() {
    let mut tree_rec = ChangeRecorder::new(true);
    let mut text_rec = ChangeRecorder::new(true);

    strip_with_tree(SAMPLE, &catalog(), &mut tree_rec).expect("tree strip");
    strip_with_regex(SAMPLE, &catalog(), &mut text_rec);

    let tree_locs = tree_rec
        .locations()
        .get("attribute:data-pm-slice")
        .expect("tree location entry");
    assert!(tree_locs.keys().any(|l| l.contains("Gutenberg Block")));

    let text_locs = text_rec
        .locations()
        .get("attribute:data-pm-slice")
        .expect("text location entry");
    assert_eq!(text_locs.get("HTML Element"), Some(&1));
}

#[test]
fn location_counts_sum_to_stat_counts_under_both_strategies() {
    for strategy in [0, 1] {
        let mut rec = ChangeRecorder::new(true);
        if strategy == 0 {
            strip_with_tree(SAMPLE, &catalog(), &mut rec).expect("tree strip");
        } else {
            strip_with_regex(SAMPLE, &catalog(), &mut rec);
        }
        let stat_total: usize = rec.stats().values().sum();
        let loc_total: usize = rec
            .locations()
            .values()
            .flat_map(std::collections::BTreeMap::values)
            .sum();
        assert_eq!(stat_total, loc_total);
    }
}
