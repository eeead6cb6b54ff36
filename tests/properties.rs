use polyrecord::{
    equals, hash_of, render, same_value, CertifiedLetter, Discounted, Employee, Entity, Letter,
    Manager, PrescriptionSunglasses, Roster, SloganTeeShirt, Sunglasses, TeeShirt,
};
use proptest::prelude::*;

// Small domains so that equal values are generated often.
fn any_entity() -> impl Strategy<Value = Box<dyn Entity>> {
    let name = prop::sample::select(vec!["Johnson", "Smith"]);
    let department = prop::sample::select(vec!["IT", "HR"]);
    let recipient = prop::sample::select(vec!["John", "Jane Smith"]);
    let date = prop::sample::select(vec!["11/16/2025", "11/17/2025"]);
    let tracking = prop::sample::select(vec!["ABC123", "XYZ789"]);
    let slogan = prop::option::of(prop::sample::select(vec!["Tigers", "Lions"]));
    let lens = prop::sample::select(vec!["brown", "green"]);
    // Signed zeros and NaN differ by bit pattern; NaN is set on the pub field
    // since construction rejects it.
    let diopter = prop::sample::select(vec![0.0, -0.0, 1.25, f64::NAN]);

    prop_oneof![
        (0i64..3, name.clone()).prop_map(|(id, name)| {
            Box::new(Employee::new(id, name).unwrap()) as Box<dyn Entity>
        }),
        (0i64..3, name, department).prop_map(|(id, name, dept)| {
            Box::new(Manager::new(id, name, dept).unwrap()) as Box<dyn Entity>
        }),
        (recipient.clone(), date.clone()).prop_map(|(to, date)| {
            Box::new(Letter::new(to, date).unwrap()) as Box<dyn Entity>
        }),
        (recipient, date, tracking).prop_map(|(to, date, number)| {
            Box::new(CertifiedLetter::new(to, date, number).unwrap()) as Box<dyn Entity>
        }),
        (0i64..3).prop_map(|cents| {
            Box::new(TeeShirt::new("blue", cents).unwrap()) as Box<dyn Entity>
        }),
        (0i64..3, slogan).prop_map(|(cents, slogan)| {
            Box::new(SloganTeeShirt::new("blue", cents, slogan.map(str::to_string)).unwrap())
                as Box<dyn Entity>
        }),
        lens.clone().prop_map(|lens| {
            Box::new(Sunglasses::new("black", lens).unwrap()) as Box<dyn Entity>
        }),
        (lens, diopter).prop_map(|(lens, diopter)| {
            let mut glasses = PrescriptionSunglasses::new("black", lens, 0.0).unwrap();
            glasses.diopter = diopter;
            Box::new(glasses) as Box<dyn Entity>
        }),
    ]
}

fn mailing_date() -> impl Strategy<Value = String> {
    (1u32..=12, 1u32..=28, 1900u32..2100).prop_map(|(m, d, y)| format!("{:02}/{:02}/{}", m, d, y))
}

proptest! {
    #[test]
    fn reflexive(a in any_entity()) {
        prop_assert!(same_value(a.as_ref(), a.as_ref()));
        prop_assert!(equals(Some(a.as_ref()), Some(a.as_ref())));
    }

    #[test]
    fn symmetric(a in any_entity(), b in any_entity()) {
        prop_assert_eq!(
            equals(Some(a.as_ref()), Some(b.as_ref())),
            equals(Some(b.as_ref()), Some(a.as_ref()))
        );
    }

    #[test]
    fn equal_values_hash_equally(a in any_entity(), b in any_entity()) {
        if same_value(a.as_ref(), b.as_ref()) {
            prop_assert_eq!(hash_of(a.as_ref()), hash_of(b.as_ref()));
        }
    }

    #[test]
    fn equality_requires_same_kind(a in any_entity(), b in any_entity()) {
        if a.kind() != b.kind() {
            prop_assert!(!same_value(a.as_ref(), b.as_ref()));
        }
    }

    #[test]
    fn manager_never_equals_employee(id in 0i64..10_000, name in "[A-Za-z]{1,12}", dept in "[A-Z]{2,4}") {
        let emp = Employee::new(id, name.clone()).unwrap();
        let mgr = Manager::new(id, name, dept).unwrap();

        prop_assert!(!equals(Some(&emp), Some(&mgr)));
        prop_assert!(!equals(Some(&mgr), Some(&emp)));
    }

    #[test]
    fn manager_display_is_employee_display_plus_department(
        id in 0i64..10_000,
        name in "[A-Za-z]{1,12}",
        dept in "[A-Z]{2,4}",
    ) {
        let emp = Employee::new(id, name.clone()).unwrap();
        let mgr = Manager::new(id, name, dept.clone()).unwrap();

        prop_assert_eq!(mgr.to_string(), format!("{}, Department: {}", emp, dept));
    }

    #[test]
    fn certified_display_is_letter_display_plus_tracking(
        recipient in "[A-Za-z][A-Za-z ]{0,15}",
        date in mailing_date(),
        tracking in "[A-Z0-9]{6}",
    ) {
        let letter = Letter::new(recipient.clone(), date.clone()).unwrap();
        let certified = CertifiedLetter::new(recipient, date, tracking.clone()).unwrap();

        let text = certified.to_string();
        let expected_suffix = format!(", Tracking #: {}", tracking);
        prop_assert!(text.starts_with(&letter.to_string()));
        prop_assert!(text.ends_with(&expected_suffix));
    }

    #[test]
    fn discounts_stay_within_price(
        cents in 0i64..=i64::MAX,
        promotion in any::<i64>(),
        slogan in prop::option::of("[A-Za-z]{1,8}"),
    ) {
        let plain = TeeShirt::new("blue", cents).unwrap();
        let shirt = SloganTeeShirt::new("blue", cents, slogan).unwrap();

        let base = plain.discounted_cents();
        prop_assert!((0..=cents).contains(&base));
        prop_assert!((0..=cents).contains(&shirt.discounted_cents()));

        let promoted = shirt.discounted_with_promotion(promotion);
        prop_assert!((0..=base).contains(&promoted));
    }

    #[test]
    fn deserialized_employee_matches_new(id in -5i64..5, name in "[ A-Za-z]{0,6}") {
        let json = serde_json::json!({"id": id, "name": name.clone()});
        let parsed = serde_json::from_value::<Employee>(json);
        let built = Employee::new(id, name);

        prop_assert_eq!(parsed.is_ok(), built.is_ok());
        if let (Ok(parsed), Ok(built)) = (parsed, built) {
            prop_assert_eq!(parsed, built);
        }
    }

    #[test]
    fn roster_holds_each_value_once(items in prop::collection::vec(any_entity(), 0..24)) {
        let mut roster = Roster::new();
        for item in items {
            roster.insert(item);
        }

        let stored: Vec<&dyn Entity> = roster.iter().collect();
        for (i, a) in stored.iter().enumerate() {
            for b in &stored[i + 1..] {
                prop_assert!(!same_value(*a, *b));
            }
        }
    }
}

#[test]
fn johnson_and_jane_smith_examples() {
    let emp1 = Employee::new(234, "Johnson").unwrap();
    let emp2 = Employee::new(234, "Johnson").unwrap();
    let mgr = Manager::new(234, "Johnson", "IT").unwrap();

    assert!(equals(Some(&emp1), Some(&emp2)));
    assert_eq!(hash_of(&emp1), hash_of(&emp2));
    assert!(!equals(Some(&emp1), Some(&mgr)));

    let letter = Letter::new("Jane Smith", "11/17/2025").unwrap();
    let certified = CertifiedLetter::new("Jane Smith", "11/17/2025", "ABC123").unwrap();
    let text = render(&certified);

    assert!(text.starts_with(&render(&letter)));
    assert!(text.ends_with(", Tracking #: ABC123"));
}

#[test]
fn diopter_equality_follows_bit_pattern() {
    let plus = PrescriptionSunglasses::new("black", "brown", 0.0).unwrap();
    let minus = PrescriptionSunglasses::new("black", "brown", -0.0).unwrap();
    assert!(!equals(Some(&plus), Some(&minus)));

    let mut nan = plus.clone();
    nan.diopter = f64::NAN;
    let twin = nan.clone();
    assert!(equals(Some(&nan), Some(&twin)));
    assert_eq!(hash_of(&nan), hash_of(&twin));
}
