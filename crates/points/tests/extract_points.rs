use pretty_assertions::assert_eq;
use ssr_hierarchy::HierarchyTree;
use ssr_points::{is_self_reference, Collator, PointResolver};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Hierarchy>
  <HierarchyItem name="BNK" alias="BNK">
    <HierarchyItem name="TRAS" alias="BNK_TRAS">
      <HierarchyItem name="SIG_0002" alias="BNK_SIG_0002">
        <HierarchyItem name="dii_LOCKED" alias="BNK_SIG_0002_LOCKED"/>
        <HierarchyItem name="aii_CURRENT" alias="BNK_SIG_0002_CURRENT"/>
      </HierarchyItem>
      <HierarchyItem name="SIG_0001" alias="BNK_SIG_0001">
        <HierarchyItem name="dii_LOCKED" alias="BNK_SIG_0001_LOCKED"/>
        <HierarchyItem name="Dii_SPARE" alias="BNK_SIG_0001_SPARE"/>
      </HierarchyItem>
      <HierarchyItem name="sig_0003" alias="BNK_sig_0003">
        <HierarchyItem name="aii_CURRENT" alias="BNK_sig_0003_CURRENT"/>
      </HierarchyItem>
    </HierarchyItem>
  </HierarchyItem>
</Hierarchy>"#;

fn report_keys() -> Vec<String> {
    let tree = HierarchyTree::parse(DOCUMENT).expect("parse");
    let root = tree.find_subtree("BNK", "TRAS").expect("TRAS subtree");
    let resolution = PointResolver::new(&tree, "BNK").resolve(root);
    let collator = Collator::en_us().expect("collator");
    collator
        .sort(resolution.points)
        .iter()
        .map(|p| p.key().to_string())
        .collect()
}

#[test]
fn extracts_and_orders_signalling_points() {
    assert_eq!(
        report_keys(),
        vec![
            "BNK_SIG_0001:dii_LOCKED",
            "BNK_SIG_0002:aii_CURRENT",
            "BNK_SIG_0002:dii_LOCKED",
            "BNK_sig_0003:aii_CURRENT",
        ]
    );
}

#[test]
fn repeated_extraction_is_identical() {
    assert_eq!(report_keys(), report_keys());
}

#[test]
fn input_named_self_reference_is_never_reported() {
    let tree = HierarchyTree::parse(
        r#"<HierarchyItem name="BNK" alias="BNK">
  <HierarchyItem name="BMF" alias="BNK_BMF">
    <HierarchyItem name="aii_ROOT" alias="BNK_aii_ROOT">
      <HierarchyItem name="aii0001" alias="BNK_AII0001"/>
    </HierarchyItem>
  </HierarchyItem>
</HierarchyItem>"#,
    )
    .expect("parse");
    let root = tree.find_subtree("BNK", "BMF").expect("BMF subtree");
    let resolution = PointResolver::new(&tree, "BNK").resolve(root);

    assert!(is_self_reference("BNK", "aii_ROOT", Some("BNK_aii_ROOT")));
    let keys: Vec<&str> = resolution.points.iter().map(|p| p.key()).collect();
    assert_eq!(keys, vec!["BNK_aii_ROOT:aii0001"]);
    assert_eq!(resolution.self_references, 1);
}
