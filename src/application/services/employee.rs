//! Employee use-cases

use std::sync::Arc;

use tracing::info;

use super::branch::BRANCH;
use crate::domain::{
    DomainError, DomainResult, Employee, EmployeeScope, NewEmployee, RepositoryProvider,
};
use crate::shared::pagination::{PageRequest, PageResult};

const EMPLOYEE: &str = "Employee";

pub struct EmployeeService {
    repos: Arc<dyn RepositoryProvider>,
}

impl EmployeeService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list(&self, request: &PageRequest) -> DomainResult<PageResult<Employee>> {
        self.repos.employees().page(EmployeeScope::All, request).await
    }

    /// Fails with `BRANCH_NOT_FOUND` when the branch itself is missing.
    pub async fn list_by_branch(&self, branch_id: i32, request: &PageRequest) -> DomainResult<PageResult<Employee>> {
        if !self.repos.branches().exists(branch_id).await? {
            return Err(DomainError::not_found(BRANCH, "id", branch_id));
        }
        self.repos
            .employees()
            .page(EmployeeScope::Branch(branch_id), request)
            .await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Employee> {
        self.repos
            .employees()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(EMPLOYEE, "id", id))
    }

    pub async fn get_by_email(&self, email: &str) -> DomainResult<Employee> {
        let email = normalize_email(email);
        self.repos
            .employees()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found(EMPLOYEE, "email", email))
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, employee: NewEmployee) -> DomainResult<Employee> {
        let employee = normalize(employee);
        self.check_references(&employee, None).await?;

        let created = self.repos.employees().insert(employee).await?;
        info!(employee_id = created.id, branch_id = created.branch_id, "Employee created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, employee: NewEmployee) -> DomainResult<Employee> {
        if !self.repos.employees().exists(id).await? {
            return Err(DomainError::not_found(EMPLOYEE, "id", id));
        }
        let employee = normalize(employee);
        self.check_references(&employee, Some(id)).await?;

        let updated = self
            .repos
            .employees()
            .update(id, employee)
            .await?
            .ok_or_else(|| DomainError::not_found(EMPLOYEE, "id", id))?;
        info!(employee_id = id, "Employee updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.employees().delete_by_id(id).await? {
            return Err(DomainError::not_found(EMPLOYEE, "id", id));
        }
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    /// Branch must exist and the email must not belong to anyone else.
    async fn check_references(&self, employee: &NewEmployee, current: Option<i32>) -> DomainResult<()> {
        if !self.repos.branches().exists(employee.branch_id).await? {
            return Err(DomainError::Dependency {
                entity: BRANCH,
                id: employee.branch_id,
            });
        }
        if self
            .repos
            .employees()
            .email_exists(&employee.email, current)
            .await?
        {
            return Err(DomainError::conflict(
                "EMAIL_ALREADY_EXISTS",
                format!("Email {} is already in use", employee.email),
            ));
        }
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn normalize(employee: NewEmployee) -> NewEmployee {
    NewEmployee {
        name: employee.name.trim().to_string(),
        email: normalize_email(&employee.email),
        branch_id: employee.branch_id,
        role: employee.role.trim().to_string(),
    }
}
