use pretty_assertions::assert_eq;
use ssr_hierarchy::{HierarchyTree, ParentLink};
use std::fmt::Write;

fn wide_document(stations: usize, points: usize) -> String {
    let mut xml = String::from("<Hierarchy>\n");
    for s in 0..stations {
        let station = format!("S{s:02}");
        writeln!(xml, r#"<HierarchyItem name="{station}" alias="{station}">"#).unwrap();
        writeln!(
            xml,
            r#"<HierarchyItem name="BMF" alias="{station}_BMF">"#
        )
        .unwrap();
        for p in 0..points {
            writeln!(
                xml,
                r#"<HierarchyItem name="aii{p:04}" alias="{station}_AII{p:04}"/>"#
            )
            .unwrap();
        }
        xml.push_str("</HierarchyItem>\n</HierarchyItem>\n");
    }
    xml.push_str("</Hierarchy>\n");
    xml
}

#[test]
fn every_point_resolves_to_its_own_station() {
    let tree = HierarchyTree::parse(&wide_document(20, 500)).expect("parse");

    for s in [0usize, 7, 19] {
        let station = format!("S{s:02}");
        let bmf = tree.find_subtree(&station, "BMF").expect("subtree");
        let descendants: Vec<_> = tree.descendants(bmf).collect();
        assert_eq!(descendants.len(), 500);

        for id in descendants {
            let alias = tree.node(id).alias().expect("alias");
            let ParentLink::Unique(parent) = tree.parent_of_alias(alias) else {
                panic!("expected a unique parent for {alias}");
            };
            assert_eq!(tree.node(parent).alias(), Some(format!("{station}_BMF").as_str()));
        }
    }
}
