use crate::{
    Result,
    blend::{BlendSpec, ComposeMethod},
    catalog::{Catalog, Variant},
    operator::{FilterRecipe, SampledOperator},
    param::sample_truncated,
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Samples operators, recipes and blends from a [`Catalog`].
///
/// The RNG is owned by the generator so a seeded generator replays the same
/// sequence of recipes.
#[derive(Debug)]
pub struct RecipeGenerator<R: Rng> {
    catalog: Catalog,
    rng: R,
}

impl RecipeGenerator<StdRng> {
    /// Builds a generator for `variant`, seeded from `seed` or from OS entropy.
    pub fn from_seed(variant: Variant, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::new(Catalog::new(variant), rng)
    }
}

impl<R: Rng> RecipeGenerator<R> {
    pub fn new(catalog: Catalog, rng: R) -> Result<Self> {
        catalog.validate()?;
        Ok(Self { catalog, rng })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// One operator: a uniformly chosen template with every slot resolved.
    pub fn generate_operator(&mut self) -> SampledOperator {
        // validate() guarantees a non-empty operator list
        let operators = self.catalog.operators();
        let template = &operators[self.rng.random_range(0..operators.len())];
        template.sample(&mut self.rng)
    }

    /// Exactly `n` independently sampled operators, in application order.
    pub fn generate_layered_operator(&mut self, n: usize) -> FilterRecipe {
        FilterRecipe::new((0..n).map(|_| self.generate_operator()).collect())
    }

    /// `int(uniform(lo, hi))` over the catalog's layer range.
    pub fn generate_layer_count(&mut self) -> usize {
        let (lo, hi) = self.catalog.layer_range();
        sample_truncated(&mut self.rng, lo, hi).max(1) as usize
    }

    pub fn generate_recipe(&mut self) -> FilterRecipe {
        let n = self.generate_layer_count();
        self.generate_layered_operator(n)
    }

    pub fn generate_blend(&mut self) -> BlendSpec {
        let method = self
            .catalog
            .compose_methods()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(ComposeMethod::Blend);

        let blend = BlendSpec::sample(method, &mut self.rng, self.catalog.displace_scale());
        log::trace!("sampled blend: {blend}");
        blend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_count_within_range() {
        let mut generator = RecipeGenerator::from_seed(Variant::Basic, Some(42)).unwrap();
        for _ in 0..500 {
            let n = generator.generate_layer_count();
            assert!(n == 1 || n == 2, "unexpected layer count {n}");
        }

        let mut generator = RecipeGenerator::from_seed(Variant::Extended, Some(42)).unwrap();
        for _ in 0..500 {
            let n = generator.generate_layer_count();
            assert!((2..8).contains(&n), "unexpected layer count {n}");
        }
    }

    #[test]
    fn test_zero_layers_is_empty_recipe() {
        let mut generator = RecipeGenerator::from_seed(Variant::Basic, Some(1)).unwrap();
        assert!(generator.generate_layered_operator(0).is_empty());
    }
}
