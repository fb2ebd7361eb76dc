//! Behavioural coverage for the tagged-union form reducers.

use crewdesk_controller::domain::{JoinField, JoinForm, OrgInfoField, OrgInfoForm};
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

#[given("an empty organization form")]
fn an_empty_organization_form() -> OrgInfoForm {
    OrgInfoForm::default()
}

#[when("identifier and name updates are applied")]
fn identifier_and_name_updates_are_applied(mut form: OrgInfoForm) -> OrgInfoForm {
    form.apply(OrgInfoField::Identifier("ORG-TECH-A7K4M".to_owned()));
    form.apply(OrgInfoField::Name("Acme Industries".to_owned()));
    form
}

#[then("the form holds exactly those values")]
fn the_form_holds_exactly_those_values(form: OrgInfoForm) {
    assert_eq!(form.identifier, "ORG-TECH-A7K4M");
    assert_eq!(form.name, "Acme Industries");
    assert!(form.ceo_email.is_empty());
    assert!(form.password.is_empty());
}

#[rstest]
fn organization_updates_land_on_their_fields() {
    let form = an_empty_organization_form();
    let form = identifier_and_name_updates_are_applied(form);
    the_form_holds_exactly_those_values(form);
}

#[rstest]
fn later_updates_replace_earlier_values() {
    let mut form = OrgInfoForm::default();
    form.apply(OrgInfoField::CeoEmail("first@example.com".to_owned()));
    form.apply(OrgInfoField::CeoEmail("second@example.com".to_owned()));
    assert_eq!(form.ceo_email, "second@example.com");
}

#[rstest]
#[case(JoinField::FullName("Ada Lovelace".to_owned()))]
#[case(JoinField::Email("ada@example.com".to_owned()))]
#[case(JoinField::Password("abc123".to_owned()))]
#[case(JoinField::ConfirmPassword("abc123".to_owned()))]
fn join_updates_touch_exactly_one_field(#[case] update: JoinField) {
    let mut form = JoinForm::default();
    form.apply(update.clone());
    let populated = [
        !form.full_name.is_empty(),
        !form.email.is_empty(),
        !form.password.is_empty(),
        !form.confirm_password.is_empty(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();
    assert_eq!(populated, 1, "one update populates one field: {update:?}");
}
