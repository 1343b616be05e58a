/// Generates the point-read accessor for a client wrapping a
/// `ResourceClient<$entity>` stored in its `inner` field.
#[macro_export]
macro_rules! impl_client_get {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](
                    &self,
                    id: String,
                ) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner
                        .get(id)
                        .await
                        .map_err(|e| <$error>::ActorCommunicationError(e.to_string()))
                }
            }
        }
    };
}
