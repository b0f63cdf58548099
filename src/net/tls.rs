//! Client-side TLS for pinned connections.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{
    ClientConfig, DigitallySignedStruct, Error as TlsError, RootCertStore, SignatureScheme,
};
use tokio_rustls::TlsConnector;

use crate::net::dial::ConnectError;

/// TLS wrapper for outbound connections to one endpoint.
///
/// The handshake always presents and verifies against the configured
/// endpoint hostname. Pinning the network address must not change the
/// identity check, otherwise certificate validation would break on every
/// balanced connection.
#[derive(Clone)]
pub struct TlsClient {
    connector: TlsConnector,
    server_name: ServerName<'static>,
    host: String,
}

impl TlsClient {
    pub fn new(host: &str, verify: bool) -> Result<Self, ConnectError> {
        let server_name =
            ServerName::try_from(host.to_string()).map_err(|_| ConnectError::InvalidServerName {
                host: host.to_string(),
            })?;

        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let mut config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        config.alpn_protocols = vec![b"http/1.1".to_vec()];

        if !verify {
            tracing::warn!(%host, "certificate verification disabled for endpoint");
            config
                .dangerous()
                .set_certificate_verifier(Arc::new(NoVerification::new()));
        }

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            server_name,
            host: host.to_string(),
        })
    }

    /// Wrap an established TCP connection. `addr` is only used to label
    /// failures.
    pub async fn handshake(
        &self,
        tcp: TcpStream,
        addr: SocketAddr,
    ) -> Result<TlsStream<TcpStream>, ConnectError> {
        self.connector
            .connect(self.server_name.clone(), tcp)
            .await
            .map_err(|source| ConnectError::Tls {
                addr,
                server_name: self.host.clone(),
                source,
            })
    }
}

/// Accepts any server certificate. Only installed when the configuration
/// explicitly sets `tls.verify = false`.
#[derive(Debug)]
struct NoVerification(CryptoProvider);

impl NoVerification {
    fn new() -> Self {
        Self(tokio_rustls::rustls::crypto::aws_lc_rs::default_provider())
    }
}

impl ServerCertVerifier for NoVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
