/// Generate a GET endpoint method on a client with a `fetch` helper.
///
/// The path and query expressions may refer to the method's parameters.
#[macro_export]
macro_rules! get_endpoint {
    (
        $client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $ret:ty,
        path = $path:expr
        $(, query = [$($key:literal => $value:expr),* $(,)?])?
    ) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$ret, $crate::error::ProductError> {
                tracing::debug!("Sending request");
                #[allow(unused_mut)]
                let mut request = $crate::http_service::ApiRequest::get($path);
                $($(request = request.query($key, $value);)*)?
                self.fetch(request).await
            }
        }
    };
}
