//! Starter content for missing module files
//!
//! Every scaffold validates cleanly on its own: commented examples sit
//! behind `#` so no header pattern picks them up, and nothing assigns a
//! credential literal.

use crate::rules::scan::{MAIN_TF, OUTPUTS_TF, README_MD, VARIABLES_TF};

/// Scaffold for a canonical role, or `None` for anything else
pub fn for_role(role: &str) -> Option<&'static str> {
    match role {
        MAIN_TF => Some(MAIN_TF_SCAFFOLD),
        VARIABLES_TF => Some(VARIABLES_TF_SCAFFOLD),
        OUTPUTS_TF => Some(OUTPUTS_TF_SCAFFOLD),
        README_MD => Some(README_SCAFFOLD),
        _ => None,
    }
}

const MAIN_TF_SCAFFOLD: &str = r#"# Core resources for this module.

terraform {
  required_version = ">= 1.3.0"
}

provider "aws" {
  region = var.region
}

# Example resource:
# resource "aws_instance" "example_instance" {
#   ami           = "ami-0c55b159cbfafe1f0"
#   instance_type = "t3.micro"
#   tags          = var.tags
# }

# Example module call with a pinned version:
# module "example_vpc" {
#   source  = "terraform-aws-modules/vpc/aws"
#   version = "~> 5.0"
# }
"#;

const VARIABLES_TF_SCAFFOLD: &str = r#"# Input variables for this module.

variable "region" {
  description = "Cloud region to deploy into"
  type        = string
  default     = "us-west-2"
}

variable "tags" {
  description = "Tags applied to every taggable resource"
  type        = map(string)
  default     = {}
}

# Example variable:
# variable "instance_type" {
#   description = "EC2 instance type"
#   type        = string
#   default     = "t3.micro"
# }
"#;

const OUTPUTS_TF_SCAFFOLD: &str = r#"# Outputs exposed by this module.

# Example output:
# output "instance_id" {
#   description = "ID of the example instance"
#   value       = aws_instance.example_instance.id
# }
"#;

const README_SCAFFOLD: &str = r#"# Terraform Module

Short description of what this module provisions.

## Usage

```hcl
module "example" {
  source = "./path/to/module"

  region = "us-west-2"
}
```

## Requirements

| Name | Version |
|------|---------|
| terraform | >= 1.3.0 |
| aws | >= 5.0 |

## Inputs

| Name | Description | Type | Default | Required |
|------|-------------|------|---------|:--------:|
| region | Cloud region to deploy into | `string` | `"us-west-2"` | no |
| tags | Tags applied to every taggable resource | `map(string)` | `{}` | no |

## Outputs

| Name | Description |
|------|-------------|
"#;
