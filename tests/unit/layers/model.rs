use super::*;

#[test]
fn column_roles_follow_index() {
    assert_eq!(ColRole::from_col_idx(0), ColRole::Full);
    assert_eq!(ColRole::from_col_idx(3), ColRole::Low);
    assert_eq!(ColRole::from_col_idx(5).to_string(), "col5");
    assert_eq!(ColRole::parse("col5"), Some(ColRole::Custom(5)));
    assert_eq!(ColRole::parse("col2"), Some(ColRole::Mid));
    assert_eq!(ColRole::parse("side"), None);
}

#[test]
fn slot_keys_are_unique_per_cell() {
    let mut keys = std::collections::HashSet::new();
    for col in 0..8 {
        for row in RowType::ALL {
            assert!(keys.insert(slot_key(col, row)));
        }
    }
    assert_eq!(slot_key(2, RowType::Bg), "mid_bg");
    assert_eq!(slot_key(0, RowType::Eff), "full_effect");
}

#[test]
fn z_order_is_eff_over_txt_over_bg_and_never_collides() {
    let mut seen = std::collections::HashSet::new();
    for col in 0..8 {
        let eff = z_index_for(col, RowType::Eff);
        let txt = z_index_for(col, RowType::Txt);
        let bg = z_index_for(col, RowType::Bg);
        assert!(eff > txt && txt > bg);
        for z in [eff, txt, bg] {
            assert!(seen.insert(z));
        }
    }
    assert_eq!(z_index_for(1, RowType::Txt), 240);
}

#[test]
fn col_role_serializes_as_string() {
    let v = serde_json::to_value(ColRole::Custom(7)).unwrap();
    assert_eq!(v, serde_json::json!("col7"));
    let r: ColRole = serde_json::from_value(serde_json::json!("high")).unwrap();
    assert_eq!(r, ColRole::High);
    assert!(serde_json::from_value::<ColRole>(serde_json::json!("top")).is_err());
}
