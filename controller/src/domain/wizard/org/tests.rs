//! Regression coverage for the organization wizard.

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::domain::department::Department;
use crate::domain::role::Role;
use crate::domain::ports::{MockNavigator, MockOrganizationDirectory, MockUserDirectory};

type TestWizard = OrgRegistrationWizard<MockOrganizationDirectory, MockUserDirectory, MockNavigator>;

fn wizard_with(
    directory: MockOrganizationDirectory,
    users: MockUserDirectory,
    navigator: MockNavigator,
) -> (TestWizard, Feedback) {
    let feedback = Feedback::default();
    let wizard = OrgRegistrationWizard::new(
        Arc::new(directory),
        Arc::new(users),
        Arc::new(navigator),
        feedback.clone(),
    );
    (wizard, feedback)
}

fn fill_valid_info(wizard: &mut TestWizard) {
    wizard.update(OrgInfoField::Identifier("ORG-TECH-A7K4M".to_owned()));
    wizard.update(OrgInfoField::Name("Acme Industries".to_owned()));
    wizard.update(OrgInfoField::CeoEmail("ceo@acme.example".to_owned()));
    wizard.update(OrgInfoField::Password("abc123".to_owned()));
    wizard.update(OrgInfoField::ConfirmPassword("abc123".to_owned()));
    wizard.update(OrgInfoField::Phone("+44 131 555 0199".to_owned()));
    wizard.update(OrgInfoField::Address("1 Forrest Rd, Edinburgh".to_owned()));
}

fn users_with_free_email() -> MockUserDirectory {
    let mut users = MockUserDirectory::new();
    users.expect_email_exists().returning(|_| Ok(false));
    users
}

fn echo_organization(payload: &NewOrganization) -> Organization {
    Organization {
        id: Uuid::new_v4(),
        identifier: payload.identifier.clone(),
        join_code: payload.join_code.clone(),
        name: payload.name.clone(),
        ceo_email: payload.ceo_email.clone(),
        ceo_password: payload.ceo_password.clone(),
        phone: payload.phone.clone(),
        address: payload.address.clone(),
        logo_url: payload.logo_url.clone(),
        website_url: payload.website_url.clone(),
        employee_count: 0,
        department_count: 0,
    }
}

fn echo_department(payload: &NewDepartment) -> Department {
    Department {
        id: Uuid::new_v4(),
        organization_id: payload.organization_id,
        name: payload.name.clone(),
        description: payload.description.clone(),
        icon: payload.icon.clone(),
    }
}

#[tokio::test]
async fn missing_fields_are_reported_together_and_block_the_step() {
    let (mut wizard, feedback) = wizard_with(
        MockOrganizationDirectory::new(),
        MockUserDirectory::new(),
        MockNavigator::new(),
    );
    wizard.update(OrgInfoField::Identifier("ORG-TECH-A7K4M".to_owned()));
    wizard.update(OrgInfoField::Name("Acme".to_owned()));
    wizard.update(OrgInfoField::CeoEmail("ceo@acme.example".to_owned()));
    wizard.update(OrgInfoField::Password("abc123".to_owned()));
    wizard.update(OrgInfoField::ConfirmPassword("abc123".to_owned()));

    wizard.advance_from_org_info().await;

    assert_eq!(wizard.step(), WizardStep::OrgInfo);
    let banner = feedback.notification().expect("aggregate banner shown");
    assert_eq!(banner.message, "Phone number and Address are required.");
    assert!(feedback.flags(Field::Phone).error);
    assert!(feedback.flags(Field::Address).error);
}

#[tokio::test]
async fn password_mismatch_clears_both_fields() {
    let (mut wizard, feedback) = wizard_with(
        MockOrganizationDirectory::new(),
        MockUserDirectory::new(),
        MockNavigator::new(),
    );
    fill_valid_info(&mut wizard);
    wizard.update(OrgInfoField::ConfirmPassword("abc124".to_owned()));

    wizard.advance_from_org_info().await;

    assert_eq!(wizard.step(), WizardStep::OrgInfo);
    assert!(wizard.form().password.is_empty());
    assert!(wizard.form().confirm_password.is_empty());
    assert!(feedback.flags(Field::Password).error);
    assert!(feedback.flags(Field::ConfirmPassword).error);
}

#[tokio::test]
async fn taken_ceo_email_blocks_the_gate() {
    let mut users = MockUserDirectory::new();
    users.expect_email_exists().return_once(|_| Ok(true));
    let (mut wizard, feedback) = wizard_with(
        MockOrganizationDirectory::new(),
        users,
        MockNavigator::new(),
    );
    fill_valid_info(&mut wizard);

    wizard.advance_from_org_info().await;

    assert_eq!(wizard.step(), WizardStep::OrgInfo);
    assert!(wizard.form().ceo_email.is_empty(), "offending value cleared");
    assert!(feedback.flags(Field::CeoEmail).error);
}

#[tokio::test]
async fn valid_info_advances_without_persisting() {
    let mut directory = MockOrganizationDirectory::new();
    directory.expect_create_organization().times(0);
    let (mut wizard, _feedback) =
        wizard_with(directory, users_with_free_email(), MockNavigator::new());
    fill_valid_info(&mut wizard);

    wizard.advance_from_org_info().await;

    assert_eq!(wizard.step(), WizardStep::Departments);
}

#[tokio::test]
async fn zero_departments_commit_skips_the_roles_step() {
    let mut directory = MockOrganizationDirectory::new();
    directory
        .expect_create_organization()
        .times(1)
        .returning(|payload| Ok(echo_organization(payload)));
    directory.expect_create_department().times(0);
    directory.expect_create_role().times(0);

    let mut navigator = MockNavigator::new();
    navigator
        .expect_navigate()
        .withf(|target| *target == NavTarget::Login)
        .times(1)
        .return_const(());

    let (mut wizard, feedback) = wizard_with(directory, users_with_free_email(), navigator);
    fill_valid_info(&mut wizard);
    wizard.advance_from_org_info().await;
    wizard.proceed_from_departments().await;

    assert_eq!(wizard.step(), WizardStep::Committed);
    let summary = wizard.confirmation().expect("commit confirmation pending");
    assert_eq!(summary.departments_created, 0);
    assert_eq!(summary.roles_created, 0);
    assert_eq!(summary.organization.join_code.as_ref().len(), 5);
    assert!(
        feedback
            .notification()
            .is_some_and(|banner| banner.message.contains("registered"))
    );

    wizard.acknowledge();
    assert!(wizard.confirmation().is_none());
}

#[tokio::test]
async fn department_batch_failure_is_one_aggregate_error_and_skips_roles() {
    let mut directory = MockOrganizationDirectory::new();
    directory
        .expect_create_organization()
        .times(1)
        .returning(|payload| Ok(echo_organization(payload)));
    directory
        .expect_create_department()
        .times(2)
        .returning(|payload| {
            if payload.name == "Sales" {
                Err(OrganizationDirectoryError::transport("timed out"))
            } else {
                Ok(echo_department(payload))
            }
        });
    directory.expect_create_role().times(0);

    let (mut wizard, feedback) =
        wizard_with(directory, users_with_free_email(), MockNavigator::new());
    fill_valid_info(&mut wizard);
    wizard.advance_from_org_info().await;
    wizard.add_department("Engineering", "").expect("draft added");
    wizard.add_department("Sales", "outbound").expect("draft added");
    wizard.proceed_from_departments().await;
    assert_eq!(wizard.step(), WizardStep::Roles);

    wizard
        .add_role(
            wizard.departments()[0].id,
            "Lead",
            1,
            RoleCapabilities::default(),
        )
        .expect("role draft added");
    wizard.finish().await;

    assert_eq!(wizard.step(), WizardStep::Roles, "commit did not complete");
    assert!(wizard.confirmation().is_none());
    let banner = feedback.notification().expect("aggregate banner shown");
    assert!(banner.message.contains("1 of 2 departments"));
}

#[tokio::test]
async fn roles_are_created_against_the_mapped_department_identities() {
    let engineering_id = Arc::new(std::sync::Mutex::new(None::<Uuid>));
    let engineering_for_create = Arc::clone(&engineering_id);

    let mut directory = MockOrganizationDirectory::new();
    directory
        .expect_create_organization()
        .times(1)
        .returning(|payload| Ok(echo_organization(payload)));
    directory
        .expect_create_department()
        .times(1)
        .returning(move |payload| {
            let department = echo_department(payload);
            *engineering_for_create.lock().expect("test lock") = Some(department.id);
            Ok(department)
        });
    let engineering_for_role = Arc::clone(&engineering_id);
    directory
        .expect_create_role()
        .times(1)
        .returning(move |payload| {
            let expected = engineering_for_role
                .lock()
                .expect("test lock")
                .expect("department created first");
            assert_eq!(payload.department_id, expected);
            assert_eq!(payload.name, "Lead");
            assert_eq!(payload.priority, 2);
            Ok(Role {
                id: Uuid::new_v4(),
                department_id: payload.department_id,
                name: payload.name.clone(),
                priority: payload.priority,
                capabilities: payload.capabilities,
            })
        });

    let (mut wizard, _feedback) =
        wizard_with(directory, users_with_free_email(), MockNavigator::new());
    fill_valid_info(&mut wizard);
    wizard.advance_from_org_info().await;
    let engineering = wizard
        .add_department("Engineering", "ships things")
        .expect("draft added");
    wizard.proceed_from_departments().await;
    wizard
        .add_role(engineering, "Lead", 2, RoleCapabilities::default())
        .expect("role draft added");
    wizard.finish().await;

    assert_eq!(wizard.step(), WizardStep::Committed);
    let summary = wizard.confirmation().expect("commit confirmation pending");
    assert_eq!(summary.departments_created, 1);
    assert_eq!(summary.roles_created, 1);
}

#[tokio::test]
async fn removing_a_department_draft_drops_its_role_drafts() {
    let (mut wizard, _feedback) = wizard_with(
        MockOrganizationDirectory::new(),
        users_with_free_email(),
        MockNavigator::new(),
    );
    fill_valid_info(&mut wizard);
    wizard.advance_from_org_info().await;
    let engineering = wizard.add_department("Engineering", "").expect("draft added");
    let sales = wizard.add_department("Sales", "").expect("draft added");
    wizard.proceed_from_departments().await;
    wizard
        .add_role(engineering, "Lead", 1, RoleCapabilities::default())
        .expect("role draft added");
    wizard
        .add_role(sales, "Account Exec", 2, RoleCapabilities::default())
        .expect("role draft added");

    wizard.remove_department(engineering);

    assert_eq!(wizard.departments().len(), 1);
    assert_eq!(wizard.roles().len(), 1);
    assert_eq!(wizard.roles()[0].department, sales);
}

#[tokio::test]
async fn role_drafts_reject_bad_priority_and_unknown_departments() {
    let (mut wizard, feedback) = wizard_with(
        MockOrganizationDirectory::new(),
        users_with_free_email(),
        MockNavigator::new(),
    );
    fill_valid_info(&mut wizard);
    wizard.advance_from_org_info().await;
    let engineering = wizard.add_department("Engineering", "").expect("draft added");
    wizard.proceed_from_departments().await;

    assert!(
        wizard
            .add_role(engineering, "Lead", 0, RoleCapabilities::default())
            .is_none()
    );
    assert!(feedback.flags(Field::RolePriority).error);

    let unknown = DraftId(99);
    assert!(
        wizard
            .add_role(unknown, "Lead", 1, RoleCapabilities::default())
            .is_none()
    );
    assert!(wizard.roles().is_empty());
}
