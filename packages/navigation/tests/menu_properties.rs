use parchment_navigation::{Direction, Link, NavigationError, NavigationItem, NavigationMenu};

fn parish_menu() -> NavigationMenu {
    let mut menu = NavigationMenu::new();
    for (id, label) in [("home", "Home"), ("mass", "Mass Times"), ("about", "About"), ("give", "Give")] {
        menu = menu.add_item(None, NavigationItem::new(id, label)).unwrap();
    }
    for (id, label) in [("history", "History"), ("staff", "Staff"), ("council", "Parish Council")] {
        menu = menu
            .add_item(Some("about"), NavigationItem::new(id, label))
            .unwrap();
    }
    menu
}

fn assert_dense(menu: &NavigationMenu) {
    for (i, item) in menu.items.iter().enumerate() {
        assert_eq!(item.order, i, "top-level order of {}", item.id);
        for (j, child) in item.children.iter().enumerate() {
            assert_eq!(child.order, j, "child order of {}", child.id);
        }
    }
}

#[test]
fn test_adding_under_any_child_exceeds_depth() {
    let menu = parish_menu();
    for child in ["history", "staff", "council"] {
        assert_eq!(
            menu.add_item(Some(child), NavigationItem::labeled("Too deep")),
            Err(NavigationError::DepthExceeded {
                parent_id: child.to_string()
            })
        );
    }
}

#[test]
fn test_order_stays_dense_through_edits() {
    let menu = parish_menu();
    assert_dense(&menu);

    let steps: Vec<Box<dyn Fn(&NavigationMenu) -> NavigationMenu>> = vec![
        Box::new(|m| m.move_item("give", Direction::Up, None).unwrap()),
        Box::new(|m| m.move_item("council", Direction::Up, Some("about")).unwrap()),
        Box::new(|m| m.remove_item("mass", None).unwrap()),
        Box::new(|m| m.remove_item("history", Some("about")).unwrap()),
        Box::new(|m| m.add_item(Some("about"), NavigationItem::labeled("Clergy")).unwrap()),
        Box::new(|m| m.move_item("home", Direction::Up, None).unwrap()),
    ];

    let mut current = menu;
    for step in steps {
        current = step(&current);
        assert_dense(&current);
    }
}

#[test]
fn test_failed_operations_leave_menu_unchanged() {
    let menu = parish_menu();
    let snapshot = menu.clone();

    assert!(menu.remove_item("ghost", None).is_err());
    assert!(menu.move_item("history", Direction::Down, None).is_err());
    assert!(menu.set_link("ghost", Link::None).is_err());
    assert!(menu.add_item(Some("staff"), NavigationItem::labeled("x")).is_err());

    assert_eq!(menu, snapshot);
}

#[test]
fn test_page_then_url_clears_page() {
    let menu = parish_menu()
        .set_link("mass", Link::Page("p1".to_string()))
        .unwrap()
        .set_link("mass", Link::Url("https://x".to_string()))
        .unwrap();

    let item = menu.find("mass").unwrap();
    assert!(item.page_id.is_none());
    assert_eq!(item.link(), Link::Url("https://x".to_string()));
}

#[test]
fn test_every_accepted_item_keeps_menu_valid() {
    let menu = parish_menu();
    let candidates = vec![
        NavigationItem::new("events", "Events").with_children(vec![
            NavigationItem::new("feast", "Feast Day"),
            NavigationItem::new("fair", "Parish Fair"),
        ]),
        NavigationItem::new("groups", "Groups").with_children(vec![
            NavigationItem::new("choir", "Choir"),
            NavigationItem::new("choir", "Choir again"),
        ]),
        NavigationItem::new("news", "News").with_children(vec![NavigationItem::new("news", "News")]),
        NavigationItem::new("visit", "Visit").with_children(vec![NavigationItem::new("staff", "Staff")]),
    ];

    let mut accepted = 0;
    for item in candidates {
        if let Ok(next) = menu.add_item(None, item) {
            accepted += 1;
            assert_eq!(next.validate(), Ok(()));
            assert_eq!(NavigationMenu::from_json(&next.to_json().unwrap()).unwrap(), next);
        }
    }
    assert_eq!(accepted, 1);
}
