//! Built-in pattern corpus

use super::{CloudProvider, ComplexityLevel, Pattern, PatternCategory};
use std::collections::BTreeMap;

fn files(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(name, content)| (name.to_string(), content.to_string()))
        .collect()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

pub fn default_patterns() -> Vec<Pattern> {
    vec![
        Pattern {
            id: "aws-vpc-basic".into(),
            name: "Basic AWS VPC".into(),
            description: "Virtual Private Cloud with public and private subnets across two availability zones".into(),
            category: PatternCategory::Networking,
            provider: CloudProvider::Aws,
            complexity: ComplexityLevel::Basic,
            files: files(&[
                ("main.tf", AWS_VPC_MAIN),
                ("variables.tf", AWS_VPC_VARIABLES),
                ("outputs.tf", AWS_VPC_OUTPUTS),
            ]),
            tags: tags(&["vpc", "subnet", "networking", "aws"]),
        },
        Pattern {
            id: "aws-ec2-web-server".into(),
            name: "AWS EC2 Web Server".into(),
            description: "Single EC2 instance behind a security group that only admits HTTP and HTTPS".into(),
            category: PatternCategory::Compute,
            provider: CloudProvider::Aws,
            complexity: ComplexityLevel::Basic,
            files: files(&[
                ("main.tf", AWS_EC2_MAIN),
                ("variables.tf", AWS_EC2_VARIABLES),
                ("outputs.tf", AWS_EC2_OUTPUTS),
            ]),
            tags: tags(&["ec2", "web", "compute", "aws"]),
        },
        Pattern {
            id: "azure-vnet-basic".into(),
            name: "Basic Azure VNet".into(),
            description: "Azure Virtual Network with a resource group and two subnets".into(),
            category: PatternCategory::Networking,
            provider: CloudProvider::Azure,
            complexity: ComplexityLevel::Basic,
            files: files(&[
                ("main.tf", AZURE_VNET_MAIN),
                ("variables.tf", AZURE_VNET_VARIABLES),
            ]),
            tags: tags(&["vnet", "subnet", "networking", "azure"]),
        },
        Pattern {
            id: "gcp-vpc-basic".into(),
            name: "Basic GCP VPC".into(),
            description: "Custom-mode VPC network with one regional subnetwork".into(),
            category: PatternCategory::Networking,
            provider: CloudProvider::Gcp,
            complexity: ComplexityLevel::Basic,
            files: files(&[
                ("main.tf", GCP_VPC_MAIN),
                ("variables.tf", GCP_VPC_VARIABLES),
            ]),
            tags: tags(&["vpc", "subnetwork", "networking", "gcp"]),
        },
        Pattern {
            id: "terraform-module-structure".into(),
            name: "Terraform Module Structure".into(),
            description: "Standard module layout with main, variables, outputs, versions and README".into(),
            category: PatternCategory::Application,
            provider: CloudProvider::Generic,
            complexity: ComplexityLevel::Basic,
            files: files(&[
                ("main.tf", MODULE_MAIN),
                ("variables.tf", MODULE_VARIABLES),
                ("outputs.tf", MODULE_OUTPUTS),
                ("versions.tf", MODULE_VERSIONS),
                ("README.md", MODULE_README),
            ]),
            tags: tags(&["module", "structure", "best-practice"]),
        },
    ]
}

const AWS_VPC_MAIN: &str = r#"resource "aws_vpc" "main_vpc" {
  cidr_block           = var.vpc_cidr
  enable_dns_support   = true
  enable_dns_hostnames = true

  tags = merge(var.tags, { Name = var.name })
}

resource "aws_subnet" "public_subnet" {
  for_each = toset(var.public_subnets)

  vpc_id                  = aws_vpc.main_vpc.id
  cidr_block              = each.value
  map_public_ip_on_launch = true

  tags = merge(var.tags, { Tier = "public" })
}

resource "aws_subnet" "private_subnet" {
  for_each = toset(var.private_subnets)

  vpc_id     = aws_vpc.main_vpc.id
  cidr_block = each.value

  tags = merge(var.tags, { Tier = "private" })
}

resource "aws_internet_gateway" "main_igw" {
  vpc_id = aws_vpc.main_vpc.id

  tags = var.tags
}
"#;

const AWS_VPC_VARIABLES: &str = r#"variable "name" {
  description = "Name prefix for VPC resources"
  type        = string
}

variable "vpc_cidr" {
  description = "CIDR block of the VPC"
  type        = string
  default     = "10.0.0.0/16"
}

variable "public_subnets" {
  description = "CIDR blocks of the public subnets"
  type        = list(string)
  default     = ["10.0.1.0/24", "10.0.2.0/24"]
}

variable "private_subnets" {
  description = "CIDR blocks of the private subnets"
  type        = list(string)
  default     = ["10.0.101.0/24", "10.0.102.0/24"]
}

variable "tags" {
  description = "Tags applied to every resource"
  type        = map(string)
  default     = {}
}
"#;

const AWS_VPC_OUTPUTS: &str = r#"output "vpc_id" {
  description = "ID of the VPC"
  value       = aws_vpc.main_vpc.id
}

output "public_subnet_ids" {
  description = "IDs of the public subnets"
  value       = [for s in aws_subnet.public_subnet : s.id]
}

output "private_subnet_ids" {
  description = "IDs of the private subnets"
  value       = [for s in aws_subnet.private_subnet : s.id]
}
"#;

const AWS_EC2_MAIN: &str = r#"data "aws_ami" "ubuntu" {
  most_recent = true
  owners      = ["099720109477"]

  filter {
    name   = "name"
    values = ["ubuntu/images/hvm-ssd/ubuntu-jammy-22.04-amd64-server-*"]
  }
}

resource "aws_security_group" "web_sg" {
  name   = "${var.name}-web"
  vpc_id = var.vpc_id

  ingress {
    from_port   = 443
    to_port     = 443
    protocol    = "tcp"
    cidr_blocks = var.allowed_cidrs
  }

  ingress {
    from_port   = 80
    to_port     = 80
    protocol    = "tcp"
    cidr_blocks = var.allowed_cidrs
  }

  egress {
    from_port   = 0
    to_port     = 0
    protocol    = "-1"
    cidr_blocks = ["0.0.0.0/0"]
  }

  tags = var.tags
}

resource "aws_instance" "web_server" {
  ami                    = data.aws_ami.ubuntu.id
  instance_type          = var.instance_type
  subnet_id              = var.subnet_id
  vpc_security_group_ids = [aws_security_group.web_sg.id]

  tags = merge(var.tags, { Name = var.name })
}
"#;

const AWS_EC2_VARIABLES: &str = r#"variable "name" {
  description = "Name of the web server"
  type        = string
}

variable "instance_type" {
  description = "EC2 instance type"
  type        = string
  default     = "t3.micro"
}

variable "vpc_id" {
  description = "VPC to place the security group in"
  type        = string
}

variable "subnet_id" {
  description = "Subnet to launch the instance in"
  type        = string
}

variable "allowed_cidrs" {
  description = "CIDR blocks allowed to reach the web ports"
  type        = list(string)
}

variable "tags" {
  description = "Tags applied to every resource"
  type        = map(string)
  default     = {}
}
"#;

const AWS_EC2_OUTPUTS: &str = r#"output "instance_id" {
  description = "ID of the web server instance"
  value       = aws_instance.web_server.id
}

output "public_ip" {
  description = "Public IP of the web server"
  value       = aws_instance.web_server.public_ip
}
"#;

const AZURE_VNET_MAIN: &str = r#"resource "azurerm_resource_group" "main_rg" {
  name     = "${var.name}-rg"
  location = var.location

  tags = var.tags
}

resource "azurerm_virtual_network" "main_vnet" {
  name                = "${var.name}-vnet"
  address_space       = [var.address_space]
  location            = azurerm_resource_group.main_rg.location
  resource_group_name = azurerm_resource_group.main_rg.name

  tags = var.tags
}

resource "azurerm_subnet" "app_subnet" {
  name                 = "app"
  resource_group_name  = azurerm_resource_group.main_rg.name
  virtual_network_name = azurerm_virtual_network.main_vnet.name
  address_prefixes     = [cidrsubnet(var.address_space, 8, 1)]
}

resource "azurerm_subnet" "data_subnet" {
  name                 = "data"
  resource_group_name  = azurerm_resource_group.main_rg.name
  virtual_network_name = azurerm_virtual_network.main_vnet.name
  address_prefixes     = [cidrsubnet(var.address_space, 8, 2)]
}
"#;

const AZURE_VNET_VARIABLES: &str = r#"variable "name" {
  description = "Name prefix for network resources"
  type        = string
}

variable "location" {
  description = "Azure region"
  type        = string
  default     = "westeurope"
}

variable "address_space" {
  description = "Address space of the virtual network"
  type        = string
  default     = "10.10.0.0/16"
}

variable "tags" {
  description = "Tags applied to every resource"
  type        = map(string)
  default     = {}
}
"#;

const GCP_VPC_MAIN: &str = r#"resource "google_compute_network" "main_network" {
  name                    = var.name
  auto_create_subnetworks = false
}

resource "google_compute_subnetwork" "main_subnet" {
  name          = "${var.name}-subnet"
  ip_cidr_range = var.subnet_cidr
  region        = var.region
  network       = google_compute_network.main_network.id
}
"#;

const GCP_VPC_VARIABLES: &str = r#"variable "name" {
  description = "Name of the network"
  type        = string
}

variable "region" {
  description = "GCP region of the subnetwork"
  type        = string
  default     = "us-central1"
}

variable "subnet_cidr" {
  description = "Primary range of the subnetwork"
  type        = string
  default     = "10.20.0.0/20"
}
"#;

const MODULE_MAIN: &str = r#"locals {
  common_tags = merge(var.tags, { ManagedBy = "terraform" })
}

# Resources go here. Split by concern (network.tf, compute.tf) once this
# file grows past a few hundred lines.
"#;

const MODULE_VARIABLES: &str = r#"variable "name" {
  description = "Name used as a prefix for all resources"
  type        = string
}

variable "tags" {
  description = "Tags applied to every taggable resource"
  type        = map(string)
  default     = {}
}
"#;

const MODULE_OUTPUTS: &str = r#"output "name" {
  description = "Name prefix used by this module"
  value       = var.name
}
"#;

const MODULE_VERSIONS: &str = r#"terraform {
  required_version = ">= 1.3.0"

  required_providers {
    aws = {
      source  = "hashicorp/aws"
      version = ">= 5.0"
    }
  }
}
"#;

const MODULE_README: &str = r#"# Module Name

What the module provisions and when to use it.

## Usage

```hcl
module "example" {
  source = "./modules/example"

  name = "demo"
}
```

## Inputs

| Name | Description | Type | Default | Required |
|------|-------------|------|---------|:--------:|
| name | Name used as a prefix for all resources | `string` | n/a | yes |
| tags | Tags applied to every taggable resource | `map(string)` | `{}` | no |

## Outputs

| Name | Description |
|------|-------------|
| name | Name prefix used by this module |
"#;
