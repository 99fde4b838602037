//! FrameBuilder: fluent API for scripting frame builds in tests.
//!
//! Goes through the same provider and assembler path as library callers,
//! with string labels for member lookup and inline assertions.

use frame_engine::{
    AssemblyTree, BillOfMaterials, ConfigError, FrameAssembler, FrameConfig, FrameConventions,
    FrameParams, Member, MaterialCalculator,
};
use profile_kernel::{KernelSolidHandle, MockKernel, TruckKernel};
use profile_ops::{KernelBundle, KernelProfileProvider, ProfileSource};

use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};

/// A fluent builder for constructing and verifying frames in tests.
///
/// Holds the kernel, the raw parameters and the result of the last build.
pub struct FrameBuilder {
    pub(crate) kernel: Box<dyn KernelBundle>,
    params: FrameParams,
    source: ProfileSource,
    conventions: FrameConventions,
    config: Option<FrameConfig>,
    built: Option<(AssemblyTree, BillOfMaterials)>,
    history: Vec<String>,
    auto_check: bool,
}

impl FrameBuilder {
    fn with_kernel(kernel: Box<dyn KernelBundle>) -> Self {
        Self {
            kernel,
            params: FrameParams::default(),
            source: ProfileSource::default(),
            conventions: FrameConventions::default(),
            config: None,
            built: None,
            history: Vec::new(),
            auto_check: false,
        }
    }

    /// Create a new FrameBuilder with MockKernel (deterministic, fast).
    pub fn mock() -> Self {
        Self::with_kernel(Box::new(MockKernel::new()))
    }

    /// Create a new FrameBuilder with TruckKernel (real geometry).
    pub fn truck() -> Self {
        Self::with_kernel(Box::new(TruckKernel::new()))
    }

    /// Enable auto-checking: after every build, run all frame oracles and
    /// fail on the first verdict that does not pass.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    /// Use a different section source for every extrusion.
    pub fn with_source(mut self, source: ProfileSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_conventions(mut self, conventions: FrameConventions) -> Self {
        self.conventions = conventions;
        self
    }

    // ── Parameters ──────────────────────────────────────────────────────

    pub fn dimensions(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.params.width = width;
        self.params.height = height;
        self.params.depth = depth;
        self
    }

    pub fn bottom_bridges(mut self, positions: impl IntoIterator<Item = f64>) -> Self {
        self.params.bottom_bridge_positions = positions.into_iter().collect();
        self
    }

    pub fn top_bridges(mut self, positions: impl IntoIterator<Item = f64>) -> Self {
        self.params.top_bridge_positions = positions.into_iter().collect();
        self
    }

    /// Replace all parameters with a validated configuration.
    pub fn config(mut self, config: &FrameConfig) -> Self {
        self.params = config.to_params();
        self
    }

    // ── Build ───────────────────────────────────────────────────────────

    /// Validate the parameters, then compute the bill and assemble.
    pub fn build(&mut self) -> Result<&mut Self, HarnessError> {
        self.built = None;
        let config = FrameConfig::from_params(self.params.clone())?;
        let bom = MaterialCalculator::calculate(&config);
        let tree = {
            let mut provider =
                KernelProfileProvider::with_source(self.kernel.as_mut(), self.source.clone());
            FrameAssembler::with_conventions(self.conventions)
                .assemble(&config, &mut provider)?
        };
        self.history.push(format!(
            "build {}x{}x{} -> {} members",
            config.width(),
            config.height(),
            config.depth(),
            tree.member_count()
        ));
        self.config = Some(config);
        self.built = Some((tree, bom));

        if self.auto_check {
            self.check_oracles()?;
        }
        Ok(self)
    }

    /// Derive a new configuration from the last validated one and rebuild.
    pub fn rebuild_with<F>(&mut self, derive: F) -> Result<&mut Self, HarnessError>
    where
        F: FnOnce(&FrameConfig) -> Result<FrameConfig, ConfigError>,
    {
        let current = self.config.as_ref().ok_or(HarnessError::NotBuilt)?;
        let next = derive(current)?;
        self.params = next.to_params();
        self.build()
    }

    // ── Access ──────────────────────────────────────────────────────────

    pub fn config_ref(&self) -> Result<&FrameConfig, HarnessError> {
        self.config.as_ref().ok_or(HarnessError::NotBuilt)
    }

    pub fn tree(&self) -> Result<&AssemblyTree, HarnessError> {
        self.built
            .as_ref()
            .map(|(tree, _)| tree)
            .ok_or(HarnessError::NotBuilt)
    }

    pub fn bom(&self) -> Result<&BillOfMaterials, HarnessError> {
        self.built
            .as_ref()
            .map(|(_, bom)| bom)
            .ok_or(HarnessError::NotBuilt)
    }

    pub fn member(&self, label: &str) -> Result<&Member, HarnessError> {
        self.tree()?
            .find_member(label)
            .ok_or_else(|| HarnessError::MemberNotFound {
                label: label.to_string(),
            })
    }

    pub fn solid_handle(&self, label: &str) -> Result<KernelSolidHandle, HarnessError> {
        Ok(self.member(label)?.shape.clone())
    }

    /// Get a reference to the kernel bundle (for direct oracle calls).
    pub fn kernel(&self) -> &dyn KernelBundle {
        self.kernel.as_ref()
    }

    /// Get the build history log.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Viewer JSON of the last build.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        self.tree()?
            .to_json()
            .map_err(|e| HarnessError::Serialization {
                reason: e.to_string(),
            })
    }

    // ── Inline Assertions ───────────────────────────────────────────────

    /// Assert the tree has exactly `expected` members.
    pub fn assert_member_count(&self, expected: usize) -> Result<&Self, HarnessError> {
        let tree = self.tree()?;
        let actual = tree.member_count();
        if actual == expected {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!(
                    "expected {} members, got {}\n{}",
                    expected,
                    actual,
                    tree.show_topology()
                ),
            })
        }
    }

    /// Assert the bill's total length within a micrometer.
    pub fn assert_total_length(&self, expected_mm: f64) -> Result<&Self, HarnessError> {
        crate::assertions::assert_total_length(self.bom()?, expected_mm, 1e-3, "builder")?;
        Ok(self)
    }

    // ── Oracle Integration ──────────────────────────────────────────────

    /// Run every frame-level oracle on the last build.
    pub fn check_frame(&self) -> Result<Vec<OracleVerdict>, HarnessError> {
        let config = self.config_ref()?;
        let (tree, bom) = self.built.as_ref().ok_or(HarnessError::NotBuilt)?;
        Ok(oracle::run_frame_checks(config, bom, tree))
    }

    /// Run topology oracles on each distinct solid of the last build.
    pub fn check_solids(&self) -> Result<Vec<OracleVerdict>, HarnessError> {
        let tree = self.tree()?;
        Ok(oracle::run_solid_checks(self.kernel.as_introspect(), tree))
    }

    fn check_oracles(&self) -> Result<(), HarnessError> {
        let verdicts = self.check_frame()?.into_iter().chain(self.check_solids()?);
        for v in verdicts {
            if !v.passed {
                return Err(HarnessError::OracleFailure {
                    oracle: v.oracle_name,
                    detail: format!("auto_check: {}", v.detail),
                });
            }
        }
        Ok(())
    }
}
