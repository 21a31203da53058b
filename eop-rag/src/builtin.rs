//! Built-in knowledge documents that can be indexed at initialization.

use crate::ingest::DocumentContent;

/// Name under which [`eop_sample_document`] is indexed.
pub const EOP_SAMPLE_NAME: &str = "EOP_Sample_Content.md";

const EOP_SAMPLE_TEXT: &str = r#"
# Emergency Operations Plan (EOP) for Research Software

## Core Principles

The Evidence Chain Model (ECM) provides a framework for maintaining computational transparency and reproducibility in research software, especially during crisis situations.

### Key Components:

1. **Computational Transparency**: All computational steps must be documented and reproducible
2. **Evidence Completeness**: Every claim must be supported by verifiable computational evidence
3. **Logical Traceability**: Clear relationships between inputs, processes, and outputs
4. **Environmental Documentation**: Complete recording of computational environment
5. **Provenance Tracking**: Full history of data transformations and analysis steps

### Crisis Management in Research

During emergencies, research continuity depends on:
- Well-documented procedures
- Accessible code repositories
- Clear dependency management
- Backup and recovery procedures
- Team communication protocols

### Implementation Guidelines

Research teams should establish:
- Version control systems (Git)
- Dependency management (pip, conda, npm)
- Containerization (Docker, Singularity)
- Documentation systems (Markdown, Sphinx, Jupyter)
- Testing frameworks and CI/CD
- Data management following FAIR principles

This framework ensures research software remains accessible and reproducible even during disruptions.
"#;

/// A document ingested when the engine is initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDocument {
    /// Document name.
    pub name: String,
    /// Document content.
    pub content: DocumentContent,
}

impl SeedDocument {
    /// Create a seed document.
    pub fn new(name: impl Into<String>, content: DocumentContent) -> Self {
        Self { name: name.into(), content }
    }
}

/// The built-in EOP/ECM overview.
pub fn eop_sample_document() -> SeedDocument {
    SeedDocument::new(EOP_SAMPLE_NAME, DocumentContent::text(EOP_SAMPLE_TEXT))
}
