//! Recorded data from Google's key server and a Firebase ID token it signed
//!
//! Captured on June 30th 2017. The certificates have long expired, which does
//! not matter here: certificate validity dates are not part of validation.

/// Key id of [`GOOGLE_CERTIFICATE`]
pub const GOOGLE_KID: &str = "8a22e940fa0b0050a7a910c94d3f36ee4c69a2e4";

/// Certificate published under [`GOOGLE_KID`]
pub const GOOGLE_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----\nMIIDHDCCAgSgAwIBAgIIMHMF2XIvsTYwDQYJKoZIhvcNAQEFBQAwMTEvMC0GA1UE\nAxMmc2VjdXJldG9rZW4uc3lzdGVtLmdzZXJ2aWNlYWNjb3VudC5jb20wHhcNMTcw\nNjI4MDA0NTI2WhcNMTcwNzAxMDExNTI2WjAxMS8wLQYDVQQDEyZzZWN1cmV0b2tl\nbi5zeXN0ZW0uZ3NlcnZpY2VhY2NvdW50LmNvbTCCASIwDQYJKoZIhvcNAQEBBQAD\nggEPADCCAQoCggEBAK3iQEzBq7quT/7g7kLNdu0EhFTxdELMq6n2Te1n5wGNtv5q\nelAxoe9WcZ5jBJe6KxfFD3TD7L4goAsNgdlGHOFACUarrBaUCKwb6f2Q26XHuVws\nMe5wBvwpfHQ3G4t12hO6k6IRbWG83cZaReQdOA+nN/F252QAABuw4pECFJasZa9y\nGzjG+37V2SZgBKToqeN5GYNgsbZsJTKYuLwsDSQUIW0IcOiugQy1wTQYU+Urnoz2\n3ABZF4U8tYyeI7W1ZOr+oU/BcjzOkGpbkApse1Ei5Ieyvm+Tz4pi6wmSja5qcKkL\nZc2Yt4ObzvaC2vza78J08yBd3cF/UAYLOxEVQS8CAwEAAaM4MDYwDAYDVR0TAQH/\nBAIwADAOBgNVHQ8BAf8EBAMCB4AwFgYDVR0lAQH/BAwwCgYIKwYBBQUHAwIwDQYJ\nKoZIhvcNAQEFBQADggEBAEGe158vjJuMA6paKQo2v0Mxl+UMYFUfK4N2Fz0KhtFF\naKwILAFwpb2DYI6AhgtlCx/JsESivw49aeRignURi4TQAFzBdEVl9onCPJHWejZI\nOp1kSqZNjU2DA930bzA7HpkLQ+d5nvO5txQXxTNWww88a5oViwmHbRmnOGdEnb9x\nMGa65fY0SW7kPy5slJoh3WAtRDezWO23ZAodF5yR1esCtSADxknnOBns9wxGsjS9\nGlICEi9kRJjgHppNo+lWRP1tYcLiRzfmUr/IH3eJjNvSVgbmf4tk5Y0q/CSNIYdT\nC5+8lD4KRRXPzE5/XU2yOK/0DFL+SW3QXF0g9rsvBd0=\n-----END CERTIFICATE-----\n";

/// Full key server response body containing [`GOOGLE_CERTIFICATE`] and three others
pub const GOOGLE_KEY_SERVER_RESPONSE: &str = r#"{
 "5800065c68da963a267e0b9c50310766c91b84f5": "-----BEGIN CERTIFICATE-----\nMIIDHDCCAgSgAwIBAgIIF05znJvEvAIwDQYJKoZIhvcNAQEFBQAwMTEvMC0GA1UE\nAxMmc2VjdXJldG9rZW4uc3lzdGVtLmdzZXJ2aWNlYWNjb3VudC5jb20wHhcNMTcw\nNjMwMDA0NTI2WhcNMTcwNzAzMDExNTI2WjAxMS8wLQYDVQQDEyZzZWN1cmV0b2tl\nbi5zeXN0ZW0uZ3NlcnZpY2VhY2NvdW50LmNvbTCCASIwDQYJKoZIhvcNAQEBBQAD\nggEPADCCAQoCggEBAIv1ZPf1eUj8dAPImfphm7+w2yXdBdbAi0bPh+gosPz1rGhf\ncJ/lM7r/Gt9HGrz9NWMvhM+DmS8OJlce0cTYl57a0JN5DrdN9eKsLYsm82rwbxK4\nkoLhfNJTxIrh0dUsBTJeE4reVISjQyA/5+MmW37n3LvQkLpeu4jllHXJdf5mkrLE\nTDEwrutBZDDVm9JV+TsHck6An7JxAKJGROtVka1wlU8xyVCMk7GQLGd9b4hGqxto\naeufg+nRceCsDnnSFCY3B2xtjsz3bRrAbvrH2CIX+h+N5Ipk2staHshEg2mfB7Rs\ni5l7L65f9sy9/YgB0EYsy4imdh9DJK2rduqxAY8CAwEAAaM4MDYwDAYDVR0TAQH/\nBAIwADAOBgNVHQ8BAf8EBAMCB4AwFgYDVR0lAQH/BAwwCgYIKwYBBQUHAwIwDQYJ\nKoZIhvcNAQEFBQADggEBAAG/tUvCvEdNOlvlttcjzrWS1qj1RiGInCCuFAbnZg2V\np2izTwlI2YSB33fnwJs2uy6TTgM6GoiAGItWE4byO3b4vOUEBNjpzS+gYzhy39tR\nPTI4czWuPyyIQjntMb0So5bcCxLViHodAwG3ARINx1bS5LwPmyLvo6DpLmtGi4o0\nqVBNZzhNMc3vd0+NJ20sc0h5+QcjnnWFQGyjwgyYfEU0zFHnlIaJcMI/YGNGM+4r\nOBW37PRp0Qi+PCn4xKDdXGV/yg0PW1qSMu2LBlXdDZvmFL7J0ZnO1GR2pJWyMaJR\nIf+IJcWaK0A9j41GS2qeUFUhQKuuA9HgmRMaF5EPoXU=\n-----END CERTIFICATE-----\n",
 "8a22e940fa0b0050a7a910c94d3f36ee4c69a2e4": "-----BEGIN CERTIFICATE-----\nMIIDHDCCAgSgAwIBAgIIMHMF2XIvsTYwDQYJKoZIhvcNAQEFBQAwMTEvMC0GA1UE\nAxMmc2VjdXJldG9rZW4uc3lzdGVtLmdzZXJ2aWNlYWNjb3VudC5jb20wHhcNMTcw\nNjI4MDA0NTI2WhcNMTcwNzAxMDExNTI2WjAxMS8wLQYDVQQDEyZzZWN1cmV0b2tl\nbi5zeXN0ZW0uZ3NlcnZpY2VhY2NvdW50LmNvbTCCASIwDQYJKoZIhvcNAQEBBQAD\nggEPADCCAQoCggEBAK3iQEzBq7quT/7g7kLNdu0EhFTxdELMq6n2Te1n5wGNtv5q\nelAxoe9WcZ5jBJe6KxfFD3TD7L4goAsNgdlGHOFACUarrBaUCKwb6f2Q26XHuVws\nMe5wBvwpfHQ3G4t12hO6k6IRbWG83cZaReQdOA+nN/F252QAABuw4pECFJasZa9y\nGzjG+37V2SZgBKToqeN5GYNgsbZsJTKYuLwsDSQUIW0IcOiugQy1wTQYU+Urnoz2\n3ABZF4U8tYyeI7W1ZOr+oU/BcjzOkGpbkApse1Ei5Ieyvm+Tz4pi6wmSja5qcKkL\nZc2Yt4ObzvaC2vza78J08yBd3cF/UAYLOxEVQS8CAwEAAaM4MDYwDAYDVR0TAQH/\nBAIwADAOBgNVHQ8BAf8EBAMCB4AwFgYDVR0lAQH/BAwwCgYIKwYBBQUHAwIwDQYJ\nKoZIhvcNAQEFBQADggEBAEGe158vjJuMA6paKQo2v0Mxl+UMYFUfK4N2Fz0KhtFF\naKwILAFwpb2DYI6AhgtlCx/JsESivw49aeRignURi4TQAFzBdEVl9onCPJHWejZI\nOp1kSqZNjU2DA930bzA7HpkLQ+d5nvO5txQXxTNWww88a5oViwmHbRmnOGdEnb9x\nMGa65fY0SW7kPy5slJoh3WAtRDezWO23ZAodF5yR1esCtSADxknnOBns9wxGsjS9\nGlICEi9kRJjgHppNo+lWRP1tYcLiRzfmUr/IH3eJjNvSVgbmf4tk5Y0q/CSNIYdT\nC5+8lD4KRRXPzE5/XU2yOK/0DFL+SW3QXF0g9rsvBd0=\n-----END CERTIFICATE-----\n",
 "42e2d53fcbeb352af4f90292291e6188af0a1f0e": "-----BEGIN CERTIFICATE-----\nMIIDHDCCAgSgAwIBAgIIJBuFiMWJ0uMwDQYJKoZIhvcNAQEFBQAwMTEvMC0GA1UE\nAxMmc2VjdXJldG9rZW4uc3lzdGVtLmdzZXJ2aWNlYWNjb3VudC5jb20wHhcNMTcw\nNjI5MDA0NTI2WhcNMTcwNzAyMDExNTI2WjAxMS8wLQYDVQQDEyZzZWN1cmV0b2tl\nbi5zeXN0ZW0uZ3NlcnZpY2VhY2NvdW50LmNvbTCCASIwDQYJKoZIhvcNAQEBBQAD\nggEPADCCAQoCggEBAN1Z5dpGnx2UFGbr1luMdO2WO/Av3U7B6/YJ8kZ91LA0NI5g\n5XmKDRB1590C55PyZaFULBE5ItTR8WkD27ZMKK3ZZbt2hbKgKU7K/EQN2FCMCf/C\nXy0B/c/04NXLYtSXKw1ukh9W5zZC2eO3+9yy/tBeAvKFAytL/VTLumaUAeNYvYzA\n4mU0+BgvU/RuMiT4IjcJWhvOR15pHrPMHURxLMJFel0PYIiyX1IYokfbrunnN0cT\ngOm3VUYekWUC8iDDGfLEL0Z/sjxXQe0DSCj7NJmLK+7BNDVGzWTPbcHQeiB1qWs+\nUDhLGvebkcpuzDWORuZIMmPibmeOAI0CHQf/QD8CAwEAAaM4MDYwDAYDVR0TAQH/\nBAIwADAOBgNVHQ8BAf8EBAMCB4AwFgYDVR0lAQH/BAwwCgYIKwYBBQUHAwIwDQYJ\nKoZIhvcNAQEFBQADggEBAAe8KakZ1nQwc4p8qtHM495TFbrG5pNbX+tzbCijm912\n/tLTvPTuIiCTwbIgOTnse8zidEzLt1pFzEU3P92j1usTAk+byOIPmJ3TGRr9aS+3\nx534CootmNqOQB0Oi4iNFqcEXvKAA834SpDsKf55ZBKCKPW3VyMvh9Z4lYlmy7SU\nzMPCix6Lo8VBPozeZt2jhqqxIuoGebNte2yOhJ0dylxMdCyCtUIhMIpeIpODmrkx\n1/ir4hy4NNyOMARDqV39VzCqCNlzkHm72Ag0nsqcuyWuekJEGzOHFz8Z74MlnPbX\nzmaKSR3fhBjWZ+jh8/CEXXbJ4NMbjamrprd6tbtb4qM=\n-----END CERTIFICATE-----\n",
 "6d2c28ba7db93388e12af78d34f75c8888ec52ca": "-----BEGIN CERTIFICATE-----\nMIIDHDCCAgSgAwIBAgIIN6sNh8+oJ+gwDQYJKoZIhvcNAQEFBQAwMTEvMC0GA1UE\nAxMmc2VjdXJldG9rZW4uc3lzdGVtLmdzZXJ2aWNlYWNjb3VudC5jb20wHhcNMTcw\nNzAxMDA0NTI2WhcNMTcwNzA0MDExNTI2WjAxMS8wLQYDVQQDEyZzZWN1cmV0b2tl\nbi5zeXN0ZW0uZ3NlcnZpY2VhY2NvdW50LmNvbTCCASIwDQYJKoZIhvcNAQEBBQAD\nggEPADCCAQoCggEBANY1CriN231UELD1jj+TKWmtnW2sxeMoXlxrSENRtiBbdwgv\n9g11C7sSqRm5E57cDhW9lfCgFCdWZMApDcHhlDrl6LUaPeUlr73myou/5tPNl77C\n6wyfpzJD7FBv/uxzGynvZFxSg+zaPK4kIi0b3vriDUH1QEk211W+AU1w2YXXd9K6\n+x1TJpIhrH1M5n069f5BxyLWwG95yfr9nlltMktLYWuq4Niw+yASS4kAImNMQhaH\nCG1jDo1iQmXvwyZThCSUnV6kmXaaiURfIIJ/PhuSjMoHQ2rCW0+LRXHV0w7Zq1lN\nl4wHCcpF2O79WBfmZkYDMI+V/SUYGbbzKFQaBRMCAwEAAaM4MDYwDAYDVR0TAQH/\nBAIwADAOBgNVHQ8BAf8EBAMCB4AwFgYDVR0lAQH/BAwwCgYIKwYBBQUHAwIwDQYJ\nKoZIhvcNAQEFBQADggEBAJoVOhSkarngMVTicnAv2Cexm84iCkLQD7GND8VviTka\np4TsjtCpHEXZe/wk9Fo6lMc+T+am6Y5/ZOq/4SN5UiayTnz3H7fvJ62hNu2Qco/V\nO1pb48b6/NKwWBcqXYfEOZNLN/NmHL9arR1s1Hm0vnEP6CAyTkHyCa37ksbSyNy5\nZ8ePQo2vA1eLPCL/ezrLCXcSkgU0Pypcbl3J+Yz8s17LcRF5doA3hdpTXw+L6m7v\nJzMg8uERJoPfiKAE447u4MNOcjtCSS5skmw1qVlB9CQOrbUqb6IEgDHLNZdvWSLe\nRApATKRJHRC0eIYLtL2i5mRQmUmzN3Ex3nNshCU6kjo=\n-----END CERTIFICATE-----\n"
}"#;

/// `header.claims` of a token signed with the key of [`GOOGLE_CERTIFICATE`]
pub const GOOGLE_SIGNED_MESSAGE: &str = "eyJhbGciOiJSUzI1NiIsImtpZCI6IjhhMjJlOTQwZmEwYjAwNTBhN2E5MTBjOTRkM2YzNmVlNGM2OWEyZTQifQ.eyJpc3MiOiJodHRwczovL3NlY3VyZXRva2VuLmdvb2dsZS5jb20vbmV1dHJpbm8tMTE1MSIsIm5hbWUiOiJNb3J0ZW4gUmFzbXVzc2VuIiwicGljdHVyZSI6Imh0dHBzOi8vbGg2Lmdvb2dsZXVzZXJjb250ZW50LmNvbS8tdGZfUTFzY1hpeTgvQUFBQUFBQUFBQUkvQUFBQUFBQUFBSGMvTUY3SWlUZ1VyNkkvcGhvdG8uanBnIiwiYXVkIjoibmV1dHJpbm8tMTE1MSIsImF1dGhfdGltZSI6MTQ5ODY3ODk5MSwidXNlcl9pZCI6IjZ4cndSMURIb1lndmNWOUUwY3ZvUEt1cG12RTIiLCJzdWIiOiI2eHJ3UjFESG9ZZ3ZjVjlFMGN2b1BLdXBtdkUyIiwiaWF0IjoxNDk4Njc4OTkxLCJleHAiOjE0OTg2ODI1OTEsImVtYWlsIjoibS5yYXNtdXNzZW44NEBnbWFpbC5jb20iLCJlbWFpbF92ZXJpZmllZCI6dHJ1ZSwiZmlyZWJhc2UiOnsiaWRlbnRpdGllcyI6eyJnb29nbGUuY29tIjpbIjEwNTE3NTgxNDY0ODYxNjMxMjM3NyJdLCJlbWFpbCI6WyJtLnJhc211c3Nlbjg0QGdtYWlsLmNvbSJdfSwic2lnbl9pbl9wcm92aWRlciI6Imdvb2dsZS5jb20ifX0";

/// Signature of [`GOOGLE_SIGNED_MESSAGE`]
pub const GOOGLE_SIGNATURE: &str = "EVvSD9mw1Hu0w8GiTa0O7zLl-0_izdTB-kiJHRl2npSYL-JUM56iw9wJqfT01j2YOnTXVSRae-pnxXEuBP7HWIOQWpOOkiKeTlRHA72yJbBrQlbBASzvKp12pND2WZjefR7MLnlqDN9nWYJn3qvPotOPGFCmGK0iFS2O1rluOZlUmX2N4DZC_5M8eBPW_FEIXyhMGDJiTUv8NoPhfKlD4sC38AQDEcCoyPM5LoqtT4fnr6AtPRHLMY7kR_oidab-HTQcRl8RuDqN9frsAhrWmMMIvbV_5m5RUELc0CTNcgzifGab-bpFV1voKk4a4zMvsoSmJYITZiAVWQxcWafsEQ";

/// Project the recorded token was issued for
pub const GOOGLE_PROJECT_ID: &str = "neutrino-1151";

/// The recorded token, `header.claims.signature`
#[must_use]
pub fn google_token() -> String {
    format!("{GOOGLE_SIGNED_MESSAGE}.{GOOGLE_SIGNATURE}")
}

/// `iat` of the recorded token
pub const GOOGLE_TOKEN_ISSUED_AT: i64 = 1_498_678_991;

/// `exp` of the recorded token
pub const GOOGLE_TOKEN_EXPIRES_AT: i64 = 1_498_682_591;

/// Self-signed certificate over a P-256 key, for exercising the non-RSA path
///
/// # Panics
///
/// Panics if OpenSSL fails to generate the key or certificate.
#[must_use]
pub fn ec_certificate_pem() -> String {
    use openssl::ec::{EcGroup, EcKey};
    use openssl::hash::MessageDigest;
    use openssl::nid::Nid;
    use openssl::pkey::PKey;

    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).expect("P-256 group");
    let key = PKey::from_ec_key(EcKey::generate(&group).expect("EC key")).expect("EC pkey");
    super::builders::self_signed_certificate_pem(&key, MessageDigest::sha256())
}
