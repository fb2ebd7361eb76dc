//! End-to-end organization onboarding against the in-memory directory.

use std::sync::Arc;

use crewdesk_controller::domain::ports::NavTarget;
use crewdesk_controller::domain::{
    Feedback, NotificationKind, OrgInfoField, OrgRegistrationWizard, RoleCapabilities, WizardStep,
};
use crewdesk_controller::test_support::{InMemoryDirectory, RecordingNavigator};

type Wizard = OrgRegistrationWizard<InMemoryDirectory, InMemoryDirectory, RecordingNavigator>;

struct Harness {
    directory: Arc<InMemoryDirectory>,
    navigator: Arc<RecordingNavigator>,
    feedback: Feedback,
    wizard: Wizard,
}

fn harness() -> Harness {
    let directory = Arc::new(InMemoryDirectory::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let feedback = Feedback::default();
    let wizard = OrgRegistrationWizard::new(
        Arc::clone(&directory),
        Arc::clone(&directory),
        Arc::clone(&navigator),
        feedback.clone(),
    );
    Harness {
        directory,
        navigator,
        feedback,
        wizard,
    }
}

fn fill_org_info(wizard: &mut Wizard) {
    wizard.update(OrgInfoField::Identifier("ORG-TECH-A7K4M".to_owned()));
    wizard.update(OrgInfoField::Name("Acme Industries".to_owned()));
    wizard.update(OrgInfoField::CeoEmail("ceo@acme.example".to_owned()));
    wizard.update(OrgInfoField::Password("abc123".to_owned()));
    wizard.update(OrgInfoField::ConfirmPassword("abc123".to_owned()));
    wizard.update(OrgInfoField::Phone("+44 131 555 0199".to_owned()));
    wizard.update(OrgInfoField::Address("1 Forrest Rd, Edinburgh".to_owned()));
    wizard.update(OrgInfoField::WebsiteUrl("https://acme.example".to_owned()));
}

#[tokio::test]
async fn registers_an_organization_with_departments_and_roles() {
    let mut h = harness();
    fill_org_info(&mut h.wizard);
    h.wizard.advance_from_org_info().await;
    assert_eq!(h.wizard.step(), WizardStep::Departments);

    let engineering = h
        .wizard
        .add_department("Engineering", "ships things")
        .expect("draft added");
    let sales = h.wizard.add_department("Sales", "").expect("draft added");
    h.wizard.proceed_from_departments().await;
    assert_eq!(h.wizard.step(), WizardStep::Roles);

    let lead_capabilities = RoleCapabilities {
        assign_tasks: true,
        view_statistics: true,
        hire: true,
        ..RoleCapabilities::default()
    };
    h.wizard
        .add_role(engineering, "Lead", 1, lead_capabilities)
        .expect("role draft added");
    h.wizard
        .add_role(sales, "Account Executive", 2, RoleCapabilities::default())
        .expect("role draft added");
    h.wizard.finish().await;

    assert_eq!(h.wizard.step(), WizardStep::Committed);
    let organizations = h.directory.organizations();
    assert_eq!(organizations.len(), 1);
    assert_eq!(organizations[0].join_code.as_ref().len(), 5);
    assert_eq!(organizations[0].identifier.as_ref(), "ORG-TECH-A7K4M");

    let departments = h.directory.stored_departments();
    assert_eq!(departments.len(), 2);
    assert!(
        departments
            .iter()
            .all(|department| department.organization_id == organizations[0].id)
    );

    let engineering_row = departments
        .iter()
        .find(|department| department.name == "Engineering")
        .expect("engineering persisted");
    let roles = h.directory.stored_roles();
    assert_eq!(roles.len(), 2);
    assert!(
        roles
            .iter()
            .any(|role| role.name == "Lead"
                && role.department_id == engineering_row.id
                && role.capabilities.hire)
    );

    h.wizard.acknowledge();
    assert_eq!(h.navigator.targets(), vec![NavTarget::Login]);
}

#[tokio::test]
async fn zero_departments_commits_directly() {
    let mut h = harness();
    fill_org_info(&mut h.wizard);
    h.wizard.advance_from_org_info().await;
    h.wizard.proceed_from_departments().await;

    assert_eq!(h.wizard.step(), WizardStep::Committed);
    assert_eq!(h.directory.organizations().len(), 1);
    assert!(h.directory.stored_departments().is_empty());
    assert!(h.directory.stored_roles().is_empty());
}

#[tokio::test]
async fn duplicate_identifier_is_rejected_with_the_server_message() {
    let seeded = harness();
    {
        let mut first = seeded.wizard;
        fill_org_info(&mut first);
        first.advance_from_org_info().await;
        first.proceed_from_departments().await;
        assert_eq!(first.step(), WizardStep::Committed);
    }

    // Second wizard against the same directory reuses the identifier but a
    // different CEO email, so the uniqueness gate passes.
    let navigator = Arc::new(RecordingNavigator::new());
    let feedback = Feedback::default();
    let mut second: Wizard = OrgRegistrationWizard::new(
        Arc::clone(&seeded.directory),
        Arc::clone(&seeded.directory),
        navigator,
        feedback.clone(),
    );
    fill_org_info(&mut second);
    second.update(OrgInfoField::CeoEmail("other@acme.example".to_owned()));
    second.advance_from_org_info().await;
    second.proceed_from_departments().await;

    assert_eq!(second.step(), WizardStep::Departments, "commit refused");
    let banner = feedback.notification().expect("banner shown");
    assert_eq!(banner.kind, NotificationKind::Error);
    assert!(banner.message.contains("identifier already exists"));
    assert_eq!(seeded.directory.organizations().len(), 1);
}

#[tokio::test]
async fn partial_department_failure_leaves_persisted_rows_and_skips_roles() {
    let mut h = harness();
    h.directory.fail_department("Sales");
    fill_org_info(&mut h.wizard);
    h.wizard.advance_from_org_info().await;

    let engineering = h
        .wizard
        .add_department("Engineering", "")
        .expect("draft added");
    h.wizard.add_department("Sales", "").expect("draft added");
    h.wizard.proceed_from_departments().await;
    h.wizard
        .add_role(engineering, "Lead", 1, RoleCapabilities::default())
        .expect("role draft added");
    h.wizard.finish().await;

    assert_eq!(h.wizard.step(), WizardStep::Roles, "commit did not finish");
    assert_eq!(h.directory.organizations().len(), 1, "organization kept");
    assert_eq!(
        h.directory.stored_departments().len(),
        1,
        "persisted rows are not rolled back"
    );
    assert!(h.directory.stored_roles().is_empty(), "roles not attempted");
    let banner = h.feedback.notification().expect("aggregate banner");
    assert!(banner.message.contains("1 of 2 departments"));
}
