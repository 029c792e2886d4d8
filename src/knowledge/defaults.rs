//! Built-in documents and authority sources

use super::{BestPracticeDoc, Document, ModuleStructureDoc, ModuleStructureFile};

/// Documentation sites the index is refreshed from
pub const DEFAULT_AUTHORITY_SOURCES: [&str; 4] = [
    "https://developer.hashicorp.com/terraform/language/modules/develop",
    "https://developer.hashicorp.com/terraform/language/style",
    "https://developer.hashicorp.com/validated-designs/terraform-operating-guides-adoption/terraform-workflows",
    "https://developer.hashicorp.com/terraform/tutorials/pro-cert/pro-review",
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn practice(
    id: &str,
    title: &str,
    category: &str,
    description: &str,
    content: &str,
    provider: Option<&str>,
    tags: &[&str],
    references: &[&str],
) -> Document {
    Document::BestPractice(BestPracticeDoc {
        id: id.into(),
        title: title.into(),
        category: category.into(),
        description: description.into(),
        content: content.into(),
        provider: provider.map(String::from),
        tags: strings(tags),
        references: strings(references),
    })
}

fn file(name: &str, description: &str, required: bool, content: &str) -> ModuleStructureFile {
    ModuleStructureFile {
        name: name.into(),
        description: description.into(),
        required,
        content: Some(content.into()),
    }
}

pub fn default_documents() -> Vec<Document> {
    vec![
        practice(
            "module-structure",
            "Standard Module Structure",
            "structure",
            "Lay modules out with the standard set of files",
            "A module keeps its primary resources in main.tf, its inputs in variables.tf, its \
             outputs in outputs.tf and its usage documentation in README.md. Larger modules add \
             providers.tf and versions.tf, and split main.tf by concern once it grows.",
            None,
            &["modules", "structure", "organization"],
            &["https://developer.hashicorp.com/terraform/language/modules/develop/structure"],
        ),
        practice(
            "variables-documentation",
            "Document Variables with Description",
            "documentation",
            "Give every variable a description",
            "Each variable declares a description explaining its purpose, accepted values and \
             constraints. Variables also declare an explicit type and, where it makes sense, a \
             default or validation block.",
            None,
            &["variables", "documentation"],
            &["https://developer.hashicorp.com/terraform/language/values/variables"],
        ),
        practice(
            "consistent-tagging",
            "Consistent Resource Tagging",
            "organization",
            "Apply the same tagging scheme to every resource",
            "Pass a map(string) tags variable from the root module into every nested module and \
             merge it into each taggable resource. Mandatory keys typically cover environment, \
             project, owner and cost center.",
            None,
            &["tagging", "organization"],
            &["https://developer.hashicorp.com/terraform/tutorials/modules/pattern-module-composition"],
        ),
        practice(
            "security-group-rules",
            "Security Group Rules",
            "security",
            "Keep security group rules least-privilege",
            "Ingress from 0.0.0.0/0 is reserved for public HTTP and HTTPS. Everything else uses \
             specific CIDR blocks or security group references. Group rules by function and give \
             each rule a description.",
            Some("aws"),
            &["security", "aws"],
            &["https://docs.aws.amazon.com/vpc/latest/userguide/VPC_SecurityGroups.html"],
        ),
        practice(
            "version-pinning",
            "Version Pinning",
            "stability",
            "Pin provider and module versions",
            "Declare provider versions in required_providers and a version argument on every \
             registry module. Pessimistic constraints such as ~> 5.0 admit compatible releases \
             and keep breaking ones out.",
            None,
            &["versioning", "stability"],
            &["https://developer.hashicorp.com/terraform/language/providers/requirements"],
        ),
        Document::ModuleStructure(ModuleStructureDoc {
            structure_type: "basic".into(),
            description: "Standard structure for a basic Terraform module".into(),
            files: vec![
                file("main.tf", "Primary resources of the module", true, BASIC_MAIN),
                file("variables.tf", "Input variables", true, BASIC_VARIABLES),
                file("outputs.tf", "Module outputs", true, BASIC_OUTPUTS),
                file("README.md", "Usage documentation", true, BASIC_README),
                file("versions.tf", "Terraform and provider version constraints", false, VERSIONS),
            ],
            examples: strings(&[BASIC_EXAMPLE]),
            provider: None,
            references: strings(&[
                "https://developer.hashicorp.com/terraform/language/modules/develop/structure",
            ]),
        }),
        Document::ModuleStructure(ModuleStructureDoc {
            structure_type: "aws".into(),
            description: "Standard structure for an AWS-focused Terraform module".into(),
            files: vec![
                file("main.tf", "Primary resources of the module", true, AWS_MAIN),
                file("variables.tf", "Input variables", true, AWS_VARIABLES),
                file("outputs.tf", "Module outputs", true, AWS_OUTPUTS),
                file("README.md", "Usage documentation", true, BASIC_README),
                file("versions.tf", "Terraform and provider version constraints", true, VERSIONS),
            ],
            examples: strings(&[AWS_EXAMPLE]),
            provider: Some("aws".into()),
            references: strings(&[
                "https://developer.hashicorp.com/terraform/language/modules/develop/structure",
                "https://registry.terraform.io/providers/hashicorp/aws/latest/docs",
            ]),
        }),
    ]
}

const BASIC_MAIN: &str = r#"resource "aws_s3_bucket" "this_bucket" {
  bucket = var.name
  tags   = var.tags
}
"#;

const BASIC_VARIABLES: &str = r#"variable "name" {
  description = "Name used for resources created by this module"
  type        = string
}

variable "tags" {
  description = "Tags added to all resources"
  type        = map(string)
  default     = {}
}
"#;

const BASIC_OUTPUTS: &str = r#"output "id" {
  description = "ID of the bucket"
  value       = aws_s3_bucket.this_bucket.id
}
"#;

const BASIC_README: &str = r#"# Example Module

## Usage

See the examples section.

## Inputs

| Name | Description | Type | Default | Required |
|------|-------------|------|---------|:--------:|
| name | Name used for resources created by this module | `string` | n/a | yes |
| tags | Tags added to all resources | `map(string)` | `{}` | no |
"#;

const VERSIONS: &str = r#"terraform {
  required_version = ">= 1.3.0"

  required_providers {
    aws = {
      source  = "hashicorp/aws"
      version = ">= 5.0"
    }
  }
}
"#;

const AWS_MAIN: &str = r#"resource "aws_security_group" "this_sg" {
  name        = "${var.name}-sg"
  description = "Security group for ${var.name}"
  vpc_id      = var.vpc_id

  tags = merge(var.tags, { Name = "${var.name}-sg" })
}
"#;

const AWS_VARIABLES: &str = r#"variable "name" {
  description = "Name used for resources created by this module"
  type        = string
}

variable "vpc_id" {
  description = "VPC the resources are created in"
  type        = string
}

variable "tags" {
  description = "Tags added to all resources"
  type        = map(string)
  default     = {}
}
"#;

const AWS_OUTPUTS: &str = r#"output "security_group_id" {
  description = "ID of the security group"
  value       = aws_security_group.this_sg.id
}
"#;

const BASIC_EXAMPLE: &str = r#"module "example" {
  source = "./example"

  name = "example"
  tags = {
    Environment = "production"
  }
}"#;

const AWS_EXAMPLE: &str = r#"module "example" {
  source = "./example"

  name   = "example"
  vpc_id = "vpc-12345678"
}"#;
