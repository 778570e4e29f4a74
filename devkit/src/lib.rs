/*!
# AARDI DevKit - Stubs et Utilitaires pour Développement

Bibliothèque facilitant le test des composants AARDI avec:
- Stub OpenObserve en process (ingestion + recherche) pour tests sans store réel
- Builders d'enregistrements de métriques
- Harness de test avec attentes sur les ingestions
*/

pub mod store_stub;
pub mod record_helpers;
pub mod test_utils;

pub use store_stub::{StoreBehavior, StubStore};
pub use record_helpers::RecordBuilder;
pub use test_utils::TestHarness;
